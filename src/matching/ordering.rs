use std::cmp::Ordering;

/// Compare haplotype names for deterministic output ordering.
///
/// Star-allele names compare by their numeric body first, then by suffix
/// (`*2` before `*17`, `*4a` before `*4b`); star alleles sort before other
/// names, and everything else compares lexicographically. Required so
/// results are reproducible across runs, not for matching correctness.
#[must_use]
pub fn allele_name_cmp(a: &str, b: &str) -> Ordering {
    match (parse_star_allele(a), parse_star_allele(b)) {
        (Some((num_a, suffix_a)), Some((num_b, suffix_b))) => num_a
            .cmp(&num_b)
            .then_with(|| suffix_a.cmp(suffix_b))
            .then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// Split a star-allele name into its numeric body and suffix
/// (`*4a` → `(4, "a")`). Returns `None` for names without a leading
/// `*digits` shape.
fn parse_star_allele(name: &str) -> Option<(u64, &str)> {
    let body = name.strip_prefix('*')?;
    let digits_end = body
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(body.len());
    if digits_end == 0 {
        return None;
    }
    let number = body[..digits_end].parse().ok()?;
    Some((number, &body[digits_end..]))
}

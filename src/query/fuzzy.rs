

pub const DEFAULT_MAX_DISTANCE: usize = 2;


/// Levenshtein distance (unit insert, delete, substitute) over chars.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Two rows of the (m+1)x(n+1) table are enough.
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuzzyMatch<'a> {
    pub term: &'a str,
    pub distance: usize,
}


/// Closest candidate within `max_distance` of `token`.
///
/// Candidates are visited in the order given, which callers keep sorted; on
/// equal distance the first one seen wins, so ties resolve
/// lexicographically. An exact match ends the scan.
pub fn closest_match<'a, I>(token: &str, candidates: I, max_distance: usize) -> Option<FuzzyMatch<'a>>
where
    I: IntoIterator<Item = &'a str>,
{
    let token_len = token.chars().count();
    let mut best: Option<FuzzyMatch<'a>> = None;

    for candidate in candidates {
        if candidate.chars().count().abs_diff(token_len) > max_distance {
            continue;
        }

        let distance = edit_distance(token, candidate);
        if distance > max_distance {
            continue;
        }
        if best.is_none_or(|b| distance < b.distance) {
            best = Some(FuzzyMatch {
                term: candidate,
                distance,
            });
            if distance == 0 {
                break;
            }
        }
    }

    best
}

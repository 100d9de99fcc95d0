//! Trial-division divisor enumeration.

/// Every divisor of `n` strictly below `n`, ascending.
///
/// Candidates are tried up to √n and each hit contributes its co-divisor
/// as well. `n = 1` has no proper divisor and `n = 0` is outside the domain,
/// so both give an empty list.
///
/// ```
/// use qfact_demos::problems::divisors_below;
///
/// assert_eq!(divisors_below(12), vec![1, 2, 3, 4, 6]);
/// assert_eq!(divisors_below(13), vec![1]);
/// ```
pub fn divisors_below(n: u64) -> Vec<u64> {
    let mut small = Vec::new();
    let mut large = Vec::new();
    let mut i = 1u64;
    while i.checked_mul(i).is_some_and(|sq| sq <= n) {
        if n % i == 0 {
            small.push(i);
            let co = n / i;
            if co != i {
                large.push(co);
            }
        }
        i += 1;
    }
    small.extend(large.into_iter().rev());
    if small.last() == Some(&n) {
        small.pop();
    }
    small
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_demo_number() {
        let divisors = divisors_below(14_400);
        assert_eq!(divisors.len(), 62);
        assert_eq!(divisors.first(), Some(&1));
        assert_eq!(divisors.last(), Some(&7_200));
    }

    #[test]
    fn test_edge_cases() {
        assert!(divisors_below(0).is_empty());
        assert!(divisors_below(1).is_empty());
        assert_eq!(divisors_below(2), vec![1]);
        assert_eq!(divisors_below(13), vec![1]);
        assert_eq!(divisors_below(16), vec![1, 2, 4, 8]);
    }

    proptest! {
        #[test]
        fn prop_matches_naive_scan(n in 1u64..5_000) {
            let naive: Vec<u64> = (1..n).filter(|i| n % i == 0).collect();
            prop_assert_eq!(divisors_below(n), naive);
        }

        #[test]
        fn prop_strictly_increasing_proper_divisors(n in 2u64..1_000_000) {
            let divisors = divisors_below(n);
            prop_assert_eq!(divisors[0], 1);
            prop_assert!(divisors.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(divisors.iter().all(|d| n % d == 0 && *d < n));
        }
    }
}

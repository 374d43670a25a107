//! 셔플용 선형 합동 난수 생성기
//! (Linear congruential generator used by `shuffled`).
//!
//! 같은 시드는 항상 같은 순열을 만든다 (The same seed always yields the same permutation).

/// 선형 합동 난수 생성기 (Linear congruential random number generator).
#[derive(Debug, Clone)]
pub struct RandomNumbers {
    current: u64,
    a: u64,
    c: u64,
    m: u64,
}

impl RandomNumbers {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        RandomNumbers {
            current: seed,
            a: 1664525,
            c: 1013904223,
            m: 1u64 << 32,
        }
    }

    /// 다음 상태로 진행하고 그 값을 돌려준다 (Advance to the next state and return it).
    pub fn next_u64(&mut self) -> u64 {
        self.current = self.a.wrapping_mul(self.current).wrapping_add(self.c) % self.m;
        self.current
    }

    /// [0, bound) 구간의 난수 (Random number in [0, bound)).
    ///
    /// `bound`는 0보다 커야 한다 (`bound` must be positive).
    pub fn next_below(&mut self, bound: usize) -> usize {
        debug_assert!(bound > 0);
        (self.next_u64() % bound as u64) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_numbers() {
        let mut a = RandomNumbers::new(42);
        let mut b = RandomNumbers::new(42);
        for _ in 0..10 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn test_next_below_in_range() {
        let mut rng = RandomNumbers::new(7);
        for bound in 1..50 {
            assert!(rng.next_below(bound) < bound);
        }
    }
}

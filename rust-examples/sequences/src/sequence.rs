//! 시퀀스 트레이트: 중간 연산과 최종 연산
//! (The sequence trait: intermediate and terminal operations).
//!
//! 시퀀스는 요소를 저장하지 않고 요소를 만드는 방법만 안다
//! (A sequence does not store elements; it only knows how to produce them).
//! `iter()`를 호출할 때마다 새 이터레이터가 만들어지므로 같은 파이프라인을 여러 번 평가할 수 있다
//! (Every call to `iter()` builds a fresh iterator, so the same pipeline can be evaluated
//! more than once).
//!
//! 핵심 구분 (Key distinction):
//! - 중간 연산 (Intermediate): `map`, `filter`, `take`, ... → 새 시퀀스를 돌려주며 아무것도 계산하지 않음
//!   (return a new sequence, compute nothing)
//! - 최종 연산 (Terminal): `to_list`, `for_each`, `any`, `sum`, ... → 요소를 하나씩 끌어와 결과를 만듦
//!   (pull elements one at a time and build a result)
//!
//! 요소는 한 번에 하나씩 모든 단계를 통과한 뒤에야 다음 요소가 소스에서 꺼내진다
//! (Each element passes through every stage before the next one is pulled from the source).
//!
//! 무한 시퀀스에 `to_list`나 `for_each`를 직접 호출하면 끝나지 않는다. 이것은 호출자의 책임이다
//! (Calling `to_list` or `for_each` directly on an infinite sequence never returns; bounding it
//! with `take` is the caller's responsibility).

use std::collections::HashSet;
use std::fmt::Display;
use std::hash::Hash;

use indexmap::IndexMap;

use crate::stages::{
    DroppedWhile, Dropped, FilteredNot, Filtered, FlatMapped, Mapped, Minus, MinusAll, OnEach,
    Plus, PlusAll, Shuffled, TakenWhile, Taken, WithIndex,
};

/// 다시 시작할 수 있는 지연 시퀀스 (A restartable lazy sequence).
///
/// # Example
///
/// ```
/// use sequences::{Sequence, generate_sequence};
///
/// let odds = generate_sequence(7, |&n| Some(n + 2)).take(5);
/// assert_eq!(odds.to_list(), vec![7, 9, 11, 13, 15]);
/// assert_eq!(odds.to_list(), vec![7, 9, 11, 13, 15]); // 재시작 가능 (restartable)
/// ```
pub trait Sequence {
    type Item;

    type Iter<'a>: Iterator<Item = Self::Item>
    where
        Self: 'a;

    /// 소스부터 다시 시작하는 새 이터레이터 (A fresh iterator starting from the source).
    fn iter(&self) -> Self::Iter<'_>;

    // =========================================================================
    // 중간 연산 (Intermediate operations)
    // =========================================================================

    fn map<U, F>(self, f: F) -> Mapped<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Item) -> U,
    {
        Mapped::new(self, f)
    }

    fn filter<P>(self, predicate: P) -> Filtered<Self, P>
    where
        Self: Sized,
        P: Fn(&Self::Item) -> bool,
    {
        Filtered::new(self, predicate)
    }

    fn filter_not<P>(self, predicate: P) -> FilteredNot<Self, P>
    where
        Self: Sized,
        P: Fn(&Self::Item) -> bool,
    {
        FilteredNot::new(self, predicate)
    }

    /// 처음 `n`개까지만 (At most the first `n` elements).
    ///
    /// `n`개를 내보낸 뒤에는 상류에서 더 끌어오지 않는다
    /// (Never pulls from upstream after `n` elements have been produced).
    fn take(self, n: usize) -> Taken<Self>
    where
        Self: Sized,
    {
        Taken::new(self, n)
    }

    /// 처음 `n`개를 건너뛴다 (Skips the first `n` elements).
    fn drop(self, n: usize) -> Dropped<Self>
    where
        Self: Sized,
    {
        Dropped::new(self, n)
    }

    fn take_while<P>(self, predicate: P) -> TakenWhile<Self, P>
    where
        Self: Sized,
        P: Fn(&Self::Item) -> bool,
    {
        TakenWhile::new(self, predicate)
    }

    fn drop_while<P>(self, predicate: P) -> DroppedWhile<Self, P>
    where
        Self: Sized,
        P: Fn(&Self::Item) -> bool,
    {
        DroppedWhile::new(self, predicate)
    }

    fn flat_map<I, F>(self, f: F) -> FlatMapped<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Item) -> I,
        I: IntoIterator,
    {
        FlatMapped::new(self, f)
    }

    /// 끝에 요소 하나를 덧붙인다 (Appends one element).
    fn plus(self, element: Self::Item) -> Plus<Self>
    where
        Self: Sized,
        Self::Item: Clone,
    {
        Plus::new(self, element)
    }

    /// 끝에 다른 시퀀스를 이어 붙인다 (Appends another sequence).
    fn plus_all<S>(self, other: S) -> PlusAll<Self, S>
    where
        Self: Sized,
        S: Sequence<Item = Self::Item>,
    {
        PlusAll::new(self, other)
    }

    /// 처음 나타나는 `element` 하나만 제거한다 (Removes the first occurrence of `element` only).
    fn minus(self, element: Self::Item) -> Minus<Self>
    where
        Self: Sized,
        Self::Item: PartialEq,
    {
        Minus::new(self, element)
    }

    /// `elements`에 속한 요소를 모두 제거한다 (Removes every element found in `elements`).
    fn minus_all(self, elements: Vec<Self::Item>) -> MinusAll<Self>
    where
        Self: Sized,
        Self::Item: PartialEq,
    {
        MinusAll::new(self, elements)
    }

    fn with_index(self) -> WithIndex<Self>
    where
        Self: Sized,
    {
        WithIndex::new(self)
    }

    /// 요소마다 부수 효과를 실행하고 요소는 그대로 넘긴다
    /// (Runs a side effect per element and passes the element through).
    fn on_each<F>(self, f: F) -> OnEach<Self, F>
    where
        Self: Sized,
        F: Fn(&Self::Item),
    {
        OnEach::new(self, f)
    }

    /// 시드로 정해지는 무작위 순서 (Random order determined by `seed`).
    ///
    /// 첫 요소를 요청할 때 상류 전체를 버퍼에 담는다
    /// (Buffers the whole upstream when the first element is requested).
    fn shuffled(self, seed: u64) -> Shuffled<Self>
    where
        Self: Sized,
    {
        Shuffled::new(self, seed)
    }

    // =========================================================================
    // 최종 연산 (Terminal operations)
    // =========================================================================

    fn to_list(&self) -> Vec<Self::Item> {
        self.iter().collect()
    }

    fn for_each<F>(&self, f: F)
    where
        F: FnMut(Self::Item),
    {
        self.iter().for_each(f);
    }

    /// 조건을 만족하는 요소를 찾는 즉시 멈춘다 (Stops as soon as a matching element is found).
    fn any<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&Self::Item) -> bool,
    {
        self.iter().any(|item| predicate(&item))
    }

    fn all<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&Self::Item) -> bool,
    {
        self.iter().all(|item| predicate(&item))
    }

    fn none<P>(&self, predicate: P) -> bool
    where
        P: FnMut(&Self::Item) -> bool,
    {
        !self.any(predicate)
    }

    fn count(&self) -> usize {
        self.iter().count()
    }

    fn first(&self) -> Option<Self::Item> {
        self.iter().next()
    }

    fn fold<B, F>(&self, init: B, f: F) -> B
    where
        F: FnMut(B, Self::Item) -> B,
    {
        self.iter().fold(init, f)
    }

    fn sum<R>(&self) -> R
    where
        R: std::iter::Sum<Self::Item>,
    {
        self.iter().sum()
    }

    /// 산술 평균, 빈 시퀀스는 `None` (Arithmetic mean; `None` for an empty sequence).
    fn average(&self) -> Option<f64>
    where
        Self::Item: AsF64,
    {
        let (total, count) = self
            .iter()
            .fold((0.0_f64, 0usize), |(total, count), item| (total + item.as_f64(), count + 1));
        (count > 0).then(|| total / count as f64)
    }

    /// 키 기준 안정 정렬 (Stable sort by key).
    fn sorted_by<K, F>(&self, key: F) -> Vec<Self::Item>
    where
        K: Ord,
        F: FnMut(&Self::Item) -> K,
    {
        let mut items = self.to_list();
        items.sort_by_key(key);
        items
    }

    /// 키마다 처음 나온 요소만 남긴다 (Keeps the first element for each key).
    fn distinct_by<K, F>(&self, mut key: F) -> Vec<Self::Item>
    where
        K: Hash + Eq,
        F: FnMut(&Self::Item) -> K,
    {
        let mut seen = HashSet::new();
        self.iter().filter(|item| seen.insert(key(item))).collect()
    }

    /// 키가 가장 큰 첫 번째 요소 (The first element with the largest key).
    fn max_by<K, F>(&self, mut key: F) -> Option<Self::Item>
    where
        K: PartialOrd,
        F: FnMut(&Self::Item) -> K,
    {
        let mut iter = self.iter();
        let mut best = iter.next()?;
        let mut best_key = key(&best);
        for item in iter {
            let k = key(&item);
            if k > best_key {
                best = item;
                best_key = k;
            }
        }
        Some(best)
    }

    /// 키가 가장 작은 첫 번째 요소 (The first element with the smallest key).
    fn min_by<K, F>(&self, mut key: F) -> Option<Self::Item>
    where
        K: PartialOrd,
        F: FnMut(&Self::Item) -> K,
    {
        let mut iter = self.iter();
        let mut best = iter.next()?;
        let mut best_key = key(&best);
        for item in iter {
            let k = key(&item);
            if k < best_key {
                best = item;
                best_key = k;
            }
        }
        Some(best)
    }

    /// 키별 묶음, 키는 처음 나온 순서를 지킨다 (Groups by key in first-seen key order).
    fn group_by<K, F>(&self, mut key: F) -> IndexMap<K, Vec<Self::Item>>
    where
        K: Hash + Eq,
        F: FnMut(&Self::Item) -> K,
    {
        let mut groups: IndexMap<K, Vec<Self::Item>> = IndexMap::new();
        for item in self.iter() {
            groups.entry(key(&item)).or_default().push(item);
        }
        groups
    }

    /// 키별 마지막 요소, 키 위치는 처음 나온 자리 (Last element per key, at the key's first-seen
    /// position).
    fn associate_by<K, F>(&self, mut key: F) -> IndexMap<K, Self::Item>
    where
        K: Hash + Eq,
        F: FnMut(&Self::Item) -> K,
    {
        let mut map = IndexMap::new();
        for item in self.iter() {
            map.insert(key(&item), item);
        }
        map
    }

    fn associate<K, V, F>(&self, f: F) -> IndexMap<K, V>
    where
        K: Hash + Eq,
        F: FnMut(Self::Item) -> (K, V),
    {
        self.iter().map(f).collect()
    }

    fn join_to_string(&self, separator: &str) -> String
    where
        Self::Item: Display,
    {
        self.iter()
            .map(|item| item.to_string())
            .collect::<Vec<_>>()
            .join(separator)
    }
}

/// `average`가 받는 수 타입 (Numeric types `average` accepts).
///
/// 64비트 정수는 큰 값에서 정밀도를 잃을 수 있다
/// (64-bit integers may lose precision for large values).
pub trait AsF64 {
    fn as_f64(self) -> f64;
}

macro_rules! impl_as_f64 {
    ($($t:ty),*) => {
        $(
            impl AsF64 for $t {
                fn as_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_as_f64!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

/// 빌린 시퀀스도 시퀀스다: 원본을 소비하지 않고 파이프라인을 만든다
/// (A borrowed sequence is a sequence too: build pipelines without consuming the original).
impl<S: Sequence + ?Sized> Sequence for &S {
    type Item = S::Item;

    type Iter<'a>
        = S::Iter<'a>
    where
        Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        (**self).iter()
    }
}

/// 실패할 수 있는 단계를 위한 최종 연산 (Terminal operations for fallible stages).
///
/// 단계 함수의 실패는 `Result` 요소로 표현한다. 첫 `Err`에서 끌어오기를 멈추고 그 오류를 돌려주며,
/// 부분 결과는 버린다 (A failing stage yields `Err` items. The first `Err` stops the pull and is
/// returned; no partial result is kept).
///
/// # Example
///
/// ```
/// use sequences::{Sequence, TrySequence, sequence_of};
///
/// let parsed = sequence_of(["1", "2", "x", "4"]).map(|s| s.parse::<i32>());
/// assert!(parsed.try_to_list().is_err());
/// ```
pub trait TrySequence<T, E>: Sequence<Item = Result<T, E>> {
    fn try_to_list(&self) -> Result<Vec<T>, E> {
        self.iter().collect()
    }

    fn try_for_each<F>(&self, mut f: F) -> Result<(), E>
    where
        F: FnMut(T),
    {
        for item in self.iter() {
            f(item?);
        }
        Ok(())
    }
}

impl<S, T, E> TrySequence<T, E> for S where S: Sequence<Item = Result<T, E>> + ?Sized {}

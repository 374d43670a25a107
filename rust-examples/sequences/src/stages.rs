//! 중간 단계 (Intermediate stages).
//!
//! 각 단계는 상류 시퀀스와 자기 클로저만 가진 데코레이터다
//! (Each stage is a decorator holding its upstream sequence and its own closure).
//! `iter()`는 상류 이터레이터를 감싼 이터레이터를 만들 뿐 요소를 계산하지 않는다
//! (`iter()` only wraps the upstream iterator; it computes no element).
//!
//! 대부분의 단계는 표준 이터레이터 어댑터에 클로저 참조를 넘긴다
//! (Most stages hand a reference to their closure to a standard iterator adapter),
//! 표준에 없는 동작만 직접 구현한다 (and only behavior std lacks is written by hand).

use std::iter::{Chain, Inspect, Map, Once, Skip, SkipWhile, Take, TakeWhile};

use crate::random::RandomNumbers;
use crate::sequence::Sequence;

// =============================================================================
// 변환 (Transformations)
// =============================================================================

/// `map` 단계 (The `map` stage).
#[derive(Clone)]
pub struct Mapped<S, F> {
    upstream: S,
    f: F,
}

impl<S, F> Mapped<S, F> {
    pub(crate) fn new(upstream: S, f: F) -> Self {
        Mapped { upstream, f }
    }
}

impl<S, F, U> Sequence for Mapped<S, F>
where
    S: Sequence,
    F: Fn(S::Item) -> U,
{
    type Item = U;

    type Iter<'a>
        = Map<S::Iter<'a>, &'a F>
    where
        Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        self.upstream.iter().map(&self.f)
    }
}

/// `flat_map` 단계 (The `flat_map` stage).
#[derive(Clone)]
pub struct FlatMapped<S, F> {
    upstream: S,
    f: F,
}

impl<S, F> FlatMapped<S, F> {
    pub(crate) fn new(upstream: S, f: F) -> Self {
        FlatMapped { upstream, f }
    }
}

impl<S, F, I> Sequence for FlatMapped<S, F>
where
    S: Sequence,
    F: Fn(S::Item) -> I,
    I: IntoIterator,
{
    type Item = I::Item;

    type Iter<'a>
        = std::iter::FlatMap<S::Iter<'a>, I, &'a F>
    where
        Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        self.upstream.iter().flat_map(&self.f)
    }
}

/// 위치와 값의 쌍 (A value paired with its position).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexedValue<T> {
    pub index: usize,
    pub value: T,
}

/// `with_index` 단계 (The `with_index` stage).
#[derive(Debug, Clone)]
pub struct WithIndex<S> {
    upstream: S,
}

impl<S> WithIndex<S> {
    pub(crate) fn new(upstream: S) -> Self {
        WithIndex { upstream }
    }
}

impl<S: Sequence> Sequence for WithIndex<S> {
    type Item = IndexedValue<S::Item>;

    type Iter<'a>
        = WithIndexIter<S::Iter<'a>>
    where
        Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        WithIndexIter {
            inner: self.upstream.iter(),
            index: 0,
        }
    }
}

pub struct WithIndexIter<I> {
    inner: I,
    index: usize,
}

impl<I: Iterator> Iterator for WithIndexIter<I> {
    type Item = IndexedValue<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let value = self.inner.next()?;
        let index = self.index;
        self.index += 1;
        Some(IndexedValue { index, value })
    }
}

/// `on_each` 단계 (The `on_each` stage).
#[derive(Clone)]
pub struct OnEach<S, F> {
    upstream: S,
    f: F,
}

impl<S, F> OnEach<S, F> {
    pub(crate) fn new(upstream: S, f: F) -> Self {
        OnEach { upstream, f }
    }
}

impl<S, F> Sequence for OnEach<S, F>
where
    S: Sequence,
    F: Fn(&S::Item),
{
    type Item = S::Item;

    type Iter<'a>
        = Inspect<S::Iter<'a>, &'a F>
    where
        Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        self.upstream.iter().inspect(&self.f)
    }
}

// =============================================================================
// 걸러내기 (Filtering)
// =============================================================================

/// `filter` 단계 (The `filter` stage).
#[derive(Clone)]
pub struct Filtered<S, P> {
    upstream: S,
    predicate: P,
}

impl<S, P> Filtered<S, P> {
    pub(crate) fn new(upstream: S, predicate: P) -> Self {
        Filtered {
            upstream,
            predicate,
        }
    }
}

impl<S, P> Sequence for Filtered<S, P>
where
    S: Sequence,
    P: Fn(&S::Item) -> bool,
{
    type Item = S::Item;

    type Iter<'a>
        = std::iter::Filter<S::Iter<'a>, &'a P>
    where
        Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        self.upstream.iter().filter(&self.predicate)
    }
}

/// `filter_not` 단계: 조건을 만족하지 않는 요소만 남긴다
/// (The `filter_not` stage: keeps elements that fail the predicate).
#[derive(Clone)]
pub struct FilteredNot<S, P> {
    upstream: S,
    predicate: P,
}

impl<S, P> FilteredNot<S, P> {
    pub(crate) fn new(upstream: S, predicate: P) -> Self {
        FilteredNot {
            upstream,
            predicate,
        }
    }
}

impl<S, P> Sequence for FilteredNot<S, P>
where
    S: Sequence,
    P: Fn(&S::Item) -> bool,
{
    type Item = S::Item;

    type Iter<'a>
        = FilterNotIter<'a, S::Iter<'a>, P>
    where
        Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        FilterNotIter {
            inner: self.upstream.iter(),
            predicate: &self.predicate,
        }
    }
}

pub struct FilterNotIter<'a, I, P> {
    inner: I,
    predicate: &'a P,
}

impl<I, P> Iterator for FilterNotIter<'_, I, P>
where
    I: Iterator,
    P: Fn(&I::Item) -> bool,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        let predicate = self.predicate;
        self.inner.find(|item| !predicate(item))
    }
}

/// `take` 단계 (The `take` stage).
#[derive(Debug, Clone)]
pub struct Taken<S> {
    upstream: S,
    n: usize,
}

impl<S> Taken<S> {
    pub(crate) fn new(upstream: S, n: usize) -> Self {
        Taken { upstream, n }
    }
}

impl<S: Sequence> Sequence for Taken<S> {
    type Item = S::Item;

    type Iter<'a>
        = Take<S::Iter<'a>>
    where
        Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        self.upstream.iter().take(self.n)
    }
}

/// `drop` 단계 (The `drop` stage).
#[derive(Debug, Clone)]
pub struct Dropped<S> {
    upstream: S,
    n: usize,
}

impl<S> Dropped<S> {
    pub(crate) fn new(upstream: S, n: usize) -> Self {
        Dropped { upstream, n }
    }
}

impl<S: Sequence> Sequence for Dropped<S> {
    type Item = S::Item;

    type Iter<'a>
        = Skip<S::Iter<'a>>
    where
        Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        self.upstream.iter().skip(self.n)
    }
}

/// `take_while` 단계 (The `take_while` stage).
#[derive(Clone)]
pub struct TakenWhile<S, P> {
    upstream: S,
    predicate: P,
}

impl<S, P> TakenWhile<S, P> {
    pub(crate) fn new(upstream: S, predicate: P) -> Self {
        TakenWhile {
            upstream,
            predicate,
        }
    }
}

impl<S, P> Sequence for TakenWhile<S, P>
where
    S: Sequence,
    P: Fn(&S::Item) -> bool,
{
    type Item = S::Item;

    type Iter<'a>
        = TakeWhile<S::Iter<'a>, &'a P>
    where
        Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        self.upstream.iter().take_while(&self.predicate)
    }
}

/// `drop_while` 단계 (The `drop_while` stage).
#[derive(Clone)]
pub struct DroppedWhile<S, P> {
    upstream: S,
    predicate: P,
}

impl<S, P> DroppedWhile<S, P> {
    pub(crate) fn new(upstream: S, predicate: P) -> Self {
        DroppedWhile {
            upstream,
            predicate,
        }
    }
}

impl<S, P> Sequence for DroppedWhile<S, P>
where
    S: Sequence,
    P: Fn(&S::Item) -> bool,
{
    type Item = S::Item;

    type Iter<'a>
        = SkipWhile<S::Iter<'a>, &'a P>
    where
        Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        self.upstream.iter().skip_while(&self.predicate)
    }
}

// =============================================================================
// 더하기와 빼기 (Plus and minus)
// =============================================================================

/// `plus` 단계: 끝에 요소 하나 (The `plus` stage: one trailing element).
#[derive(Debug, Clone)]
pub struct Plus<S: Sequence> {
    upstream: S,
    element: S::Item,
}

impl<S: Sequence> Plus<S> {
    pub(crate) fn new(upstream: S, element: S::Item) -> Self {
        Plus { upstream, element }
    }
}

impl<S> Sequence for Plus<S>
where
    S: Sequence,
    S::Item: Clone,
{
    type Item = S::Item;

    type Iter<'a>
        = Chain<S::Iter<'a>, Once<S::Item>>
    where
        Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        self.upstream
            .iter()
            .chain(std::iter::once(self.element.clone()))
    }
}

/// `plus_all` 단계: 두 시퀀스 잇기 (The `plus_all` stage: concatenation).
#[derive(Debug, Clone)]
pub struct PlusAll<S, T> {
    upstream: S,
    other: T,
}

impl<S, T> PlusAll<S, T> {
    pub(crate) fn new(upstream: S, other: T) -> Self {
        PlusAll { upstream, other }
    }
}

impl<S, T> Sequence for PlusAll<S, T>
where
    S: Sequence,
    T: Sequence<Item = S::Item>,
{
    type Item = S::Item;

    type Iter<'a>
        = Chain<S::Iter<'a>, T::Iter<'a>>
    where
        Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        self.upstream.iter().chain(self.other.iter())
    }
}

/// `minus` 단계: 처음 일치하는 요소 하나만 뺀다
/// (The `minus` stage: removes the first matching element only).
#[derive(Debug, Clone)]
pub struct Minus<S: Sequence> {
    upstream: S,
    element: S::Item,
}

impl<S: Sequence> Minus<S> {
    pub(crate) fn new(upstream: S, element: S::Item) -> Self {
        Minus { upstream, element }
    }
}

impl<S> Sequence for Minus<S>
where
    S: Sequence,
    S::Item: PartialEq,
{
    type Item = S::Item;

    type Iter<'a>
        = MinusIter<'a, S::Iter<'a>, S::Item>
    where
        Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        MinusIter {
            inner: self.upstream.iter(),
            element: &self.element,
            removed: false,
        }
    }
}

pub struct MinusIter<'a, I, T> {
    inner: I,
    element: &'a T,
    removed: bool,
}

impl<I, T> Iterator for MinusIter<'_, I, T>
where
    I: Iterator<Item = T>,
    T: PartialEq,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let item = self.inner.next()?;
        if !self.removed && item == *self.element {
            self.removed = true;
            return self.inner.next();
        }
        Some(item)
    }
}

/// `minus_all` 단계: 주어진 요소는 모두 뺀다
/// (The `minus_all` stage: removes every occurrence of the given elements).
#[derive(Debug, Clone)]
pub struct MinusAll<S: Sequence> {
    upstream: S,
    elements: Vec<S::Item>,
}

impl<S: Sequence> MinusAll<S> {
    pub(crate) fn new(upstream: S, elements: Vec<S::Item>) -> Self {
        MinusAll { upstream, elements }
    }
}

impl<S> Sequence for MinusAll<S>
where
    S: Sequence,
    S::Item: PartialEq,
{
    type Item = S::Item;

    type Iter<'a>
        = MinusAllIter<'a, S::Iter<'a>, S::Item>
    where
        Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        MinusAllIter {
            inner: self.upstream.iter(),
            elements: &self.elements,
        }
    }
}

pub struct MinusAllIter<'a, I, T> {
    inner: I,
    elements: &'a [T],
}

impl<I, T> Iterator for MinusAllIter<'_, I, T>
where
    I: Iterator<Item = T>,
    T: PartialEq,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let elements = self.elements;
        self.inner.find(|item| !elements.contains(item))
    }
}

// =============================================================================
// 섞기 (Shuffling)
// =============================================================================

/// `shuffled` 단계 (The `shuffled` stage).
#[derive(Debug, Clone)]
pub struct Shuffled<S> {
    upstream: S,
    seed: u64,
}

impl<S> Shuffled<S> {
    pub(crate) fn new(upstream: S, seed: u64) -> Self {
        Shuffled { upstream, seed }
    }
}

impl<S: Sequence> Sequence for Shuffled<S> {
    type Item = S::Item;

    type Iter<'a>
        = ShuffledIter<S::Iter<'a>>
    where
        Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        ShuffledIter {
            upstream: Some(self.upstream.iter()),
            buffer: Vec::new(),
            rng: RandomNumbers::new(self.seed),
        }
    }
}

pub struct ShuffledIter<I: Iterator> {
    upstream: Option<I>,
    buffer: Vec<I::Item>,
    rng: RandomNumbers,
}

impl<I: Iterator> Iterator for ShuffledIter<I> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        // 첫 요청에서만 상류를 모두 읽는다 (Drain upstream on the first request only)
        if let Some(upstream) = self.upstream.take() {
            self.buffer = upstream.collect();
            tracing::trace!(len = self.buffer.len(), "shuffled sequence buffered upstream");
        }
        if self.buffer.is_empty() {
            return None;
        }
        let pick = self.rng.next_below(self.buffer.len());
        Some(self.buffer.swap_remove(pick))
    }
}

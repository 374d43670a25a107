//! 시퀀스 소스 (Sequence sources).
//!
//! | Source | Finite | Restartable |
//! |--------|--------|-------------|
//! | `sequence_of` | yes | yes |
//! | `generate_sequence` | maybe | yes |
//! | `generate_sequence_with` | maybe | yes, seed recomputed per pass |
//! | `empty_sequence` | yes | yes |
//! | `OnceSequence` | maybe | no |

use std::cell::RefCell;
use std::iter::{Cloned, Empty, Flatten};
use std::marker::PhantomData;

use crate::error::{Result, SequenceError};
use crate::sequence::Sequence;

// =============================================================================
// 유한 소스 (Finite sources)
// =============================================================================

/// 소유한 요소 목록 위의 시퀀스 (A sequence over an owned list of items).
///
/// 매 패스마다 요소를 복제해 내보낸다 (Items are cloned out on every pass).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceOf<T> {
    items: Vec<T>,
}

/// 주어진 요소들로 시퀀스를 만든다 (Build a sequence from the given items).
///
/// ```
/// use sequences::{Sequence, sequence_of};
///
/// let seq = sequence_of(["a", "b", "c"]);
/// assert_eq!(seq.count(), 3);
/// ```
pub fn sequence_of<I: IntoIterator>(items: I) -> SequenceOf<I::Item> {
    SequenceOf {
        items: items.into_iter().collect(),
    }
}

impl<T> FromIterator<T> for SequenceOf<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        sequence_of(iter)
    }
}

impl<T: Clone> Sequence for SequenceOf<T> {
    type Item = T;

    type Iter<'a>
        = Cloned<std::slice::Iter<'a, T>>
    where
        Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        self.items.iter().cloned()
    }
}

/// 빈 시퀀스 (The empty sequence).
#[derive(Debug, Clone, Copy)]
pub struct EmptySequence<T> {
    _item: PhantomData<fn() -> T>,
}

pub fn empty_sequence<T>() -> EmptySequence<T> {
    EmptySequence { _item: PhantomData }
}

impl<T> Sequence for EmptySequence<T> {
    type Item = T;

    type Iter<'a>
        = Empty<T>
    where
        Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        std::iter::empty()
    }
}

// =============================================================================
// 생성 소스 (Generated sources)
// =============================================================================

/// 시드와 다음 값 함수로 만든 시퀀스 (A sequence built from a seed and a next-value function).
///
/// `next`가 `None`을 돌려주면 생성이 끝난다 (Generation ends when `next` returns `None`).
/// `next`는 다음 요소를 요청받을 때에만 호출된다
/// (`next` is called only when the following element is pulled).
///
/// ```
/// use sequences::{Sequence, generate_sequence};
///
/// let powers = generate_sequence(1u32, |&n| (n < 100).then_some(n * 3));
/// assert_eq!(powers.to_list(), vec![1, 3, 9, 27, 81, 243]);
/// ```
pub fn generate_sequence<T, F>(seed: T, next: F) -> GenerateSequence<T, F>
where
    T: Clone,
    F: Fn(&T) -> Option<T>,
{
    GenerateSequence { seed, next }
}

#[derive(Clone)]
pub struct GenerateSequence<T, F> {
    seed: T,
    next: F,
}

impl<T, F> Sequence for GenerateSequence<T, F>
where
    T: Clone,
    F: Fn(&T) -> Option<T>,
{
    type Item = T;

    type Iter<'a>
        = GenerateIter<'a, T, F>
    where
        Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        GenerateIter {
            start: Start::Seed(self.seed.clone()),
            last: None,
            next: &self.next,
        }
    }
}

/// 시드를 함수로 늦게 계산하는 생성 시퀀스
/// (A generated sequence whose seed is computed lazily by a function).
///
/// 시드 함수가 `None`이면 빈 시퀀스다 (An absent seed yields an empty sequence).
/// 시드 함수는 패스마다 첫 요소를 요청할 때 한 번 호출된다
/// (The seed function runs once per pass, when the first element is pulled).
pub fn generate_sequence_with<T, S, F>(seed: S, next: F) -> GenerateSequenceWith<T, S, F>
where
    T: Clone,
    S: Fn() -> Option<T>,
    F: Fn(&T) -> Option<T>,
{
    GenerateSequenceWith {
        seed,
        next,
        _item: PhantomData,
    }
}

#[derive(Clone)]
pub struct GenerateSequenceWith<T, S, F> {
    seed: S,
    next: F,
    _item: PhantomData<fn() -> T>,
}

impl<T, S, F> Sequence for GenerateSequenceWith<T, S, F>
where
    T: Clone,
    S: Fn() -> Option<T>,
    F: Fn(&T) -> Option<T>,
{
    type Item = T;

    type Iter<'a>
        = GenerateIter<'a, T, F>
    where
        Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        GenerateIter {
            start: Start::Deferred(&self.seed),
            last: None,
            next: &self.next,
        }
    }
}

enum Start<'a, T> {
    Seed(T),
    Deferred(&'a dyn Fn() -> Option<T>),
    Started,
}

pub struct GenerateIter<'a, T, F> {
    start: Start<'a, T>,
    last: Option<T>,
    next: &'a F,
}

impl<T, F> Iterator for GenerateIter<'_, T, F>
where
    T: Clone,
    F: Fn(&T) -> Option<T>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let value = match std::mem::replace(&mut self.start, Start::Started) {
            Start::Seed(seed) => seed,
            Start::Deferred(seed) => seed()?,
            // 한 번 끝나면 계속 끝난 상태 (once finished, stays finished)
            Start::Started => {
                let last = self.last.take()?;
                (self.next)(&last)?
            }
        };
        self.last = Some(value.clone());
        Some(value)
    }
}

// =============================================================================
// 한 번만 읽을 수 있는 소스 (One-shot source)
// =============================================================================

/// 외부 이터레이터를 감싼 한 번만 소비할 수 있는 시퀀스
/// (A sequence over an external iterator that can be consumed only once).
///
/// 두 번째 `iter()`는 아무것도 내보내지 않는다
/// (The second `iter()` yields nothing); use [`OnceSequence::try_iter`] to get an error instead.
///
/// ```
/// use sequences::{Sequence, as_sequence};
///
/// let lines = as_sequence("a\nb\nc".lines());
/// assert_eq!(lines.to_list(), vec!["a", "b", "c"]);
/// assert!(lines.to_list().is_empty());
/// ```
#[derive(Debug)]
pub struct OnceSequence<I> {
    source: RefCell<Option<I>>,
}

impl<I: Iterator> OnceSequence<I> {
    pub fn new(iter: I) -> Self {
        OnceSequence {
            source: RefCell::new(Some(iter)),
        }
    }

    /// 원본 이터레이터를 꺼낸다, 이미 소비했다면 오류
    /// (Take the underlying iterator, or fail if it was already consumed).
    pub fn try_iter(&self) -> Result<I> {
        self.source
            .borrow_mut()
            .take()
            .ok_or(SequenceError::AlreadyConsumed)
    }

    pub fn is_consumed(&self) -> bool {
        self.source.borrow().is_none()
    }
}

pub fn as_sequence<I: IntoIterator>(iter: I) -> OnceSequence<I::IntoIter> {
    OnceSequence::new(iter.into_iter())
}

impl<I: Iterator> Sequence for OnceSequence<I> {
    type Item = I::Item;

    type Iter<'a>
        = Flatten<std::option::IntoIter<I>>
    where
        Self: 'a;

    fn iter(&self) -> Self::Iter<'_> {
        let source = self.source.borrow_mut().take();
        if source.is_none() {
            tracing::warn!("one-shot sequence iterated again, yielding nothing");
        }
        source.into_iter().flatten()
    }
}

use crate::SeqRes;
use crate::err::SeqErr;
use std::iter::{empty, repeat_with, successors};

/// 序列基数
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Cardinality {
    /// 有限序列，携带元素数量上界。
    Finite(usize),
    /// 无限序列，必须由下游limit截断后才能被有限终结操作消费。
    Unbounded,
}

impl Cardinality {
    pub(crate) fn concat(self, other: Cardinality) -> Cardinality {
        match (self, other) {
            (Cardinality::Finite(first), Cardinality::Finite(second)) => {
                Cardinality::Finite(first.saturating_add(second))
            }
            _ => Cardinality::Unbounded,
        }
    }
}

/// 惰性数据源，按需逐个产出元素。
///
/// 所有构造函数产出的迭代都是fuse过的：耗尽之后再次拉取始终返回`None`。
/// 一个数据源在一次求值运行中最多被消费一次（按值移动保证）；
/// 需要重复消费时从持有数据的缓冲区重新派生一个新的数据源。
pub struct Source<T> {
    pub(crate) iter: Box<dyn Iterator<Item = T>>,
    pub(crate) cardinality: Cardinality,
}

impl<T> Iterator for Source<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next()
    }
}

impl<T: 'static> Source<T> {
    /// 从缓冲区构造有限数据源，保持插入顺序。
    pub fn from_buffer(elements: Vec<T>) -> Source<T> {
        let cardinality = Cardinality::Finite(elements.len());
        Source { iter: Box::new(elements.into_iter().fuse()), cardinality }
    }

    /// 从切片的`[start, end)`范围构造有限数据源。
    /// 要求`start <= end <= len`，否则返回[`SeqErr::SliceOutOfRange`]。
    pub fn from_slice(elements: &[T], start: usize, end: usize) -> SeqRes<Source<T>>
    where
        T: Clone,
    {
        if start > end || end > elements.len() {
            return Err(SeqErr::SliceOutOfRange { start, end, len: elements.len() });
        }
        Ok(Source::from_buffer(elements[start..end].to_vec()))
    }

    /// 构造不产出任何元素的数据源。
    pub fn empty() -> Source<T> {
        Source { iter: Box::new(empty()), cardinality: Cardinality::Finite(0) }
    }

    /// 由无参生成函数构造无限数据源，每次拉取调用一次`supplier`。
    /// 下游必须组合`limit`，否则有限终结操作不会终止（由调用方保证，不做运行时检测）。
    pub fn generate(supplier: impl FnMut() -> T + 'static) -> Source<T> {
        Source { iter: Box::new(repeat_with(supplier)), cardinality: Cardinality::Unbounded }
    }

    /// 由种子与迭代函数构造无限数据源。
    /// 第一次拉取产出`seed`，之后每次产出`step(上一个元素)`。
    pub fn iterate(seed: T, mut step: impl FnMut(&T) -> T + 'static) -> Source<T> {
        Source {
            iter: Box::new(successors(Some(seed), move |prev| Some(step(prev)))),
            cardinality: Cardinality::Unbounded,
        }
    }

    /// 串接两个数据源：先耗尽`a`再拉取`b`，顺序保持。
    /// 结果为有限当且仅当两者都有限。
    pub fn concat(a: Source<T>, b: Source<T>) -> Source<T> {
        let cardinality = a.cardinality.concat(b.cardinality);
        Source { iter: Box::new(a.iter.chain(b.iter).fuse()), cardinality }
    }

    /// 构造数据源构建器，元素按添加顺序产出。
    pub fn builder() -> SourceBuilder<T> {
        SourceBuilder { elements: Vec::new() }
    }

    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }
}

/// 数据源构建器
pub struct SourceBuilder<T> {
    elements: Vec<T>,
}

impl<T: 'static> SourceBuilder<T> {
    pub fn add(mut self, value: T) -> SourceBuilder<T> {
        self.elements.push(value);
        self
    }

    pub fn build(self) -> Source<T> {
        Source::from_buffer(self.elements)
    }
}

use crate::SeqRes;
use crate::err::SeqErr;
use crate::pipe::Pipe;
use crate::source::Cardinality;
use rustc_hash::FxHashSet;
use std::cmp::Ordering;
use std::hash::Hash;
use std::rc::Rc;

/// 单个惰性阶段描述符。
///
/// 闭包通过`Rc`共享且附加后不再修改，因此阶段与操作链都可以廉价克隆；
/// 求值期间的可变状态（去重集合、排序缓冲区）在每次运行时单独创建。
pub enum Stage<T> {
    /// 过滤：仅把谓词为真的元素交给下一阶段，被拒绝的元素静默跳过。
    Filter(Rc<dyn Fn(&T) -> bool>),
    /// 映射：逐个替换元素，数量与顺序不变。
    Map(Rc<dyn Fn(T) -> T>),
    /// 旁路观察：按产出顺序访问每个元素，不改变数据。
    Peek(Rc<dyn Fn(&T)>),
    /// 去重：按首次出现顺序保留，相等性由`Eq + Hash`决定。
    Distinct,
    /// 全量排序：需要先耗尽上游，稳定排序，相等元素保持输入相对顺序。
    Sorted(Rc<dyn Fn(&T, &T) -> Ordering>),
    /// 跳过前n个元素，保留后续元素。
    Skip(usize),
    /// 最多产出n个元素，达到配额后不再向上游拉取。
    Limit(usize),
}

// 手动实现以避免对T的Clone约束
impl<T> Clone for Stage<T> {
    fn clone(&self) -> Stage<T> {
        match self {
            Stage::Filter(pred) => Stage::Filter(pred.clone()),
            Stage::Map(f) => Stage::Map(f.clone()),
            Stage::Peek(action) => Stage::Peek(action.clone()),
            Stage::Distinct => Stage::Distinct,
            Stage::Sorted(cmp) => Stage::Sorted(cmp.clone()),
            Stage::Skip(count) => Stage::Skip(*count),
            Stage::Limit(count) => Stage::Limit(*count),
        }
    }
}

impl<T: Clone + Eq + Hash + 'static> Stage<T> {
    /// 把当前阶段包装到pipe之上，返回新的pipe。
    pub(crate) fn wrap(&self, pipe: Pipe<T>) -> Pipe<T> {
        match self {
            Stage::Filter(pred) => {
                let pred = pred.clone();
                pipe.op_filter(move |item| pred(item))
            }
            Stage::Map(f) => {
                let f = f.clone();
                pipe.op_map(move |item| f(item))
            }
            Stage::Peek(action) => {
                let action = action.clone();
                pipe.op_inspect(move |item| action(item))
            }
            Stage::Distinct => {
                let mut seen = FxHashSet::default();
                pipe.op_filter(move |item| seen.insert(item.clone()))
            }
            Stage::Sorted(cmp) => {
                Pipe { iter: Box::new(SortedIter { upstream: Some((pipe, cmp.clone())), buffer: Vec::new().into_iter() }) }
            }
            Stage::Skip(count) => Pipe { iter: Box::new(pipe.skip(*count)) },
            Stage::Limit(count) => Pipe { iter: Box::new(pipe.take(*count)) },
        }
    }

    /// 按静态组合顺序推导经过当前阶段后的序列基数。
    /// 在无限上游上排序在此报错，此时求值尚未开始，也不会产出部分结果。
    pub(crate) fn out_cardinality(&self, upstream: Cardinality) -> SeqRes<Cardinality> {
        match self {
            Stage::Sorted(_) => {
                if upstream == Cardinality::Unbounded { Err(SeqErr::UnboundedSort) } else { Ok(upstream) }
            }
            Stage::Limit(count) => Ok(match upstream {
                Cardinality::Finite(n) => Cardinality::Finite(n.min(*count)),
                Cardinality::Unbounded => Cardinality::Finite(*count),
            }),
            Stage::Skip(count) => Ok(match upstream {
                Cardinality::Finite(n) => Cardinality::Finite(n.saturating_sub(*count)),
                Cardinality::Unbounded => Cardinality::Unbounded,
            }),
            Stage::Filter(_) | Stage::Map(_) | Stage::Peek(_) | Stage::Distinct => Ok(upstream),
        }
    }
}

/// 全量排序的惰性外壳：绑定阶段只持有上游，
/// 首次拉取时一次性耗尽上游并稳定排序，之后从缓冲区逐个产出。
struct SortedIter<T> {
    upstream: Option<(Pipe<T>, Rc<dyn Fn(&T, &T) -> Ordering>)>,
    buffer: std::vec::IntoIter<T>,
}

impl<T> Iterator for SortedIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some((pipe, cmp)) = self.upstream.take() {
            let mut elements: Vec<T> = pipe.collect();
            elements.sort_by(|first, second| cmp(first, second)); // sort_by是稳定排序
            self.buffer = elements.into_iter();
        }
        self.buffer.next()
    }
}

/// 持久化的操作链。
///
/// 每次附加阶段都返回一条新链，原链保持有效，可以继续附加其他阶段或
/// 绑定到另一个数据源；共享同一前缀的两条链各自求值互不影响。
pub struct Chain<T> {
    pub(crate) stages: Vec<Stage<T>>,
}

impl<T> Clone for Chain<T> {
    fn clone(&self) -> Chain<T> {
        Chain { stages: self.stages.clone() }
    }
}

impl<T> Default for Chain<T> {
    fn default() -> Chain<T> {
        Chain::new()
    }
}

impl<T> Chain<T> {
    /// 构造空链，求值时直接透传数据源。
    pub fn new() -> Chain<T> {
        Chain { stages: Vec::new() }
    }

    fn attach(&self, stage: Stage<T>) -> Chain<T> {
        let mut stages = self.stages.clone();
        stages.push(stage);
        Chain { stages }
    }

    pub fn filter(&self, pred: impl Fn(&T) -> bool + 'static) -> Chain<T> {
        self.attach(Stage::Filter(Rc::new(pred)))
    }

    pub fn map(&self, f: impl Fn(T) -> T + 'static) -> Chain<T> {
        self.attach(Stage::Map(Rc::new(f)))
    }

    pub fn peek(&self, action: impl Fn(&T) + 'static) -> Chain<T> {
        self.attach(Stage::Peek(Rc::new(action)))
    }

    pub fn distinct(&self) -> Chain<T> {
        self.attach(Stage::Distinct)
    }

    /// 按给定比较器排序。
    pub fn sorted(&self, cmp: impl Fn(&T, &T) -> Ordering + 'static) -> Chain<T> {
        self.attach(Stage::Sorted(Rc::new(cmp)))
    }

    /// 按T自身的全序排序。
    pub fn sorted_default(&self) -> Chain<T>
    where
        T: Ord + 'static,
    {
        self.attach(Stage::Sorted(Rc::new(T::cmp)))
    }

    pub fn skip(&self, count: usize) -> Chain<T> {
        self.attach(Stage::Skip(count))
    }

    pub fn limit(&self, count: usize) -> Chain<T> {
        self.attach(Stage::Limit(count))
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

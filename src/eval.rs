use crate::SeqRes;
use crate::pipe::Pipe;
use crate::source::Source;
use crate::stage::Chain;
use std::hash::Hash;

/// 单次求值运行：把一个数据源绑定到一条操作链上。
///
/// 绑定时逐个阶段包装拉取链，并按静态组合顺序推导序列基数，
/// 组合错误（如在无限序列上排序）在此返回，不会拉取任何元素，
/// 也就不会向终结操作交付部分结果。
///
/// 终结操作按值消费self，每次运行恰好调用一个终结操作；
/// 求值为拉取式单遍，产出顺序即输入顺序（排序阶段除外）。
pub struct Evaluator<T> {
    pipe: Pipe<T>,
}

impl<T: Clone + Eq + Hash + 'static> Evaluator<T> {
    pub fn new(source: Source<T>, chain: &Chain<T>) -> SeqRes<Evaluator<T>> {
        let mut cardinality = source.cardinality;
        let mut pipe = Pipe { iter: source.iter };
        for stage in &chain.stages {
            cardinality = stage.out_cardinality(cardinality)?;
            pipe = stage.wrap(pipe);
        }
        Ok(Evaluator { pipe })
    }

    /// 逐个拉取元素并执行action，副作用按链的产出顺序发生，无返回值。
    pub fn for_each(self, mut action: impl FnMut(T)) {
        for item in self.pipe {
            action(item);
        }
    }

    /// 顺序左折叠，空序列返回`identity`。
    /// `accumulator`需要满足结合律（由调用方保证，求值器不校验），
    /// 以便未来并行求值通过[`Evaluator::fold`]的combiner合并部分结果。
    pub fn reduce(self, identity: T, accumulator: impl Fn(T, T) -> T) -> T {
        self.pipe.fold(identity, |acc, item| accumulator(acc, item))
    }

    /// 三参数折叠。
    /// `combiner`用于合并在不相交子范围上独立计算的部分结果；
    /// 顺序求值只产生一个部分结果，combiner不会被调用，但必须正确提供。
    pub fn fold<R>(self, identity: R, accumulator: impl Fn(R, T) -> R, _combiner: impl Fn(R, R) -> R) -> R {
        self.pipe.fold(identity, |acc, item| accumulator(acc, item))
    }

    /// 容器收集协议。
    /// `factory`创建一个可变结果容器，`accumulator`把元素原地并入容器，
    /// `combiner`合并两次独立运行产出的容器，仅在求值被拆分时使用。
    pub fn collect<R>(
        self, factory: impl Fn() -> R, accumulator: impl Fn(&mut R, T), _combiner: impl Fn(&mut R, R),
    ) -> R {
        let mut container = factory();
        for item in self.pipe {
            accumulator(&mut container, item);
        }
        container
    }

    /// 收集为Vec，保持产出顺序。
    pub fn to_list(self) -> Vec<T> {
        self.collect(Vec::new, |list, item| list.push(item), |list, mut other| list.append(&mut other))
    }

    /// 统计产出的元素数量。
    pub fn count(self) -> usize {
        self.fold(0usize, |acc, _| acc + 1, |first, second| first + second)
    }
}

//! 惰性序列转换流水线。
//!
//! 调用方先构造数据源（[`Source`]），再声明一条由若干惰性阶段组成的操作链
//! （[`Chain`]），最后通过求值器（[`Evaluator`]）恰好触发一次终结操作。
//! 组合阶段不会触碰任何元素，求值按拉取方式单遍完成。
//!
//! ```
//! use rseq::{Chain, Evaluator, Source};
//!
//! let chain = Chain::new().filter(|s: &String| s.len() <= 2).sorted_default();
//! let source = Source::from_buffer(vec!["ccc".to_string(), "b".to_string(), "aa".to_string()]);
//! let result = Evaluator::new(source, &chain).unwrap().to_list();
//! assert_eq!(result, vec!["aa".to_string(), "b".to_string()]);
//! ```

mod err;
mod eval;
mod opt;
mod pipe;
mod source;
mod stage;

pub use err::SeqErr;
pub use eval::Evaluator;
pub use opt::Opt;
pub use source::{Cardinality, Source, SourceBuilder};
pub use stage::{Chain, Stage};

pub type SeqRes<T> = Result<T, SeqErr>;

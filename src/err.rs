use thiserror::Error;

#[derive(Error, Debug, Eq, PartialEq)]
pub enum SeqErr {
    #[error("[Range] Invalid slice range: start `{start}`, end `{end}` out of length `{len}`")]
    SliceOutOfRange { start: usize, end: usize, len: usize },

    #[error("[Sort] Unable to sort an unbounded sequence, apply `limit` before `sorted`")]
    UnboundedSort,

    #[error("[Optional] Unable to wrap the absent sentinel as a present value")]
    NullValue,
}

use crate::SeqRes;
use crate::err::SeqErr;

/// 可能存在的单值包装：`Present`恰好持有一个值，`Absent`表示缺失。
///
/// 构造后不可变；对内部值的全部操作仅限[`Opt::map`]与[`Opt::flat_map`]，
/// 不暴露可能为空的直接访问器。典型用法是组合一串相互依赖的键查找，
/// 任一环节缺失时整条链短路为缺失，而不是在中途抛错。
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Opt<T> {
    Present(T),
    Absent,
}

impl<T> Opt<T> {
    /// 把宿主的可缺失值包装为存在。
    /// 值为缺失哨兵（`None`）时返回[`SeqErr::NullValue`]，
    /// 合法的缺失场景应使用[`Opt::empty`]。
    pub fn of(value: Option<T>) -> SeqRes<Opt<T>> {
        match value {
            Some(value) => Ok(Opt::Present(value)),
            None => Err(SeqErr::NullValue),
        }
    }

    /// 包装一个必然存在的值。
    pub fn present(value: T) -> Opt<T> {
        Opt::Present(value)
    }

    /// 构造缺失包装。
    pub fn empty() -> Opt<T> {
        Opt::Absent
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Opt::Present(_))
    }

    /// 存在时返回`present(f(value))`，缺失时返回`empty`且不调用f。
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Opt<U> {
        match self {
            Opt::Present(value) => Opt::Present(f(value)),
            Opt::Absent => Opt::Absent,
        }
    }

    /// 存在时直接返回`f(value)`（f自身返回包装，依赖查找不会嵌套包装），
    /// 缺失时返回`empty`。
    pub fn flat_map<U>(self, f: impl FnOnce(T) -> Opt<U>) -> Opt<U> {
        match self {
            Opt::Present(value) => f(value),
            Opt::Absent => Opt::Absent,
        }
    }

    /// 仅在存在时执行action，缺失时不做任何事。
    pub fn if_present(self, action: impl FnOnce(T)) {
        if let Opt::Present(value) = self {
            action(value);
        }
    }

    /// 存在时返回内部值，缺失时返回default。
    pub fn or_value(self, default: T) -> T {
        match self {
            Opt::Present(value) => value,
            Opt::Absent => default,
        }
    }
}

#[cfg(test)]
mod opt_tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(map: &HashMap<&str, &str>, key: &str) -> Opt<String> {
        match map.get(key) {
            Some(value) => Opt::present(value.to_string()),
            None => Opt::empty(),
        }
    }

    #[test]
    fn test_of_rejects_the_absent_sentinel() {
        assert_eq!(Opt::of(Some("abc")), Ok(Opt::Present("abc")));
        assert_eq!(Opt::<&str>::of(None), Err(SeqErr::NullValue));
    }

    #[test]
    fn test_map_skips_absent() {
        assert_eq!(Opt::present(2).map(|value| value * 3), Opt::Present(6));
        assert_eq!(Opt::<i32>::empty().map(|value| value * 3), Opt::Absent);
    }

    #[test]
    fn test_flat_map_does_not_nest() {
        assert_eq!(Opt::present(2).flat_map(|value| Opt::present(value * 3)), Opt::Present(6));
        assert_eq!(Opt::present(2).flat_map(|_| Opt::<i32>::empty()), Opt::Absent);
        assert_eq!(Opt::<i32>::empty().flat_map(|value| Opt::present(value * 3)), Opt::Absent);
    }

    #[test]
    fn test_if_present_only_runs_when_present() {
        let mut invoked = false;
        Opt::present("abc").if_present(|_| invoked = true);
        assert!(invoked);

        let mut invoked = false;
        Opt::<&str>::empty().if_present(|_| invoked = true);
        assert!(!invoked);
    }

    #[test]
    fn test_or_value_supplies_default_when_absent() {
        assert_eq!(Opt::present("abc").or_value("def"), "abc");
        assert_eq!(Opt::empty().or_value("def"), "def");
    }

    #[test]
    fn test_lookup_chain_with_all_keys_present() {
        let map = HashMap::from([("A", "B"), ("B", "C"), ("C", "D")]);
        let result = lookup(&map, "A")
            .flat_map(|key| lookup(&map, &key))
            .flat_map(|key| lookup(&map, &key));
        assert_eq!(result, Opt::Present("D".to_string()));
    }

    #[test]
    fn test_lookup_chain_short_circuits_on_missing_key() {
        // "B"缺失，后续查找全部短路为缺失，不会中途报错
        let map = HashMap::from([("A", "B"), ("C", "D")]);
        let result = lookup(&map, "A")
            .flat_map(|key| lookup(&map, &key))
            .flat_map(|key| lookup(&map, &key));
        assert_eq!(result, Opt::Absent);

        let mut invoked = false;
        result.if_present(|_| invoked = true);
        assert!(!invoked);
    }
}

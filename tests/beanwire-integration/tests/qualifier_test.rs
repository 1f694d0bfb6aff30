//! 限定名解析的集成测试

use beanwire::{name, AppContext, Autowired, BeanError};
use std::sync::Arc;

trait QualifiedFoo: Send + Sync {
    fn foo(&self) -> String;
}

struct FirstFooImpl;

impl QualifiedFoo for FirstFooImpl {
    fn foo(&self) -> String {
        "first foo".to_string()
    }
}

struct SecondFooImpl;

impl QualifiedFoo for SecondFooImpl {
    fn foo(&self) -> String {
        "second foo".to_string()
    }
}

trait QualifiedBar: Send + Sync {
    fn first(&self) -> String;
    fn second(&self) -> String;
    fn another(&self) -> String;
}

struct QualifiedBarImpl {
    first_foo: Autowired<dyn QualifiedFoo>,
    second_foo: Autowired<dyn QualifiedFoo>,
    another_foo: Autowired<dyn QualifiedFoo>,
}

impl QualifiedBar for QualifiedBarImpl {
    fn first(&self) -> String {
        format!("{} bar", self.first_foo.get().unwrap().foo())
    }

    fn second(&self) -> String {
        format!("{} bar", self.second_foo.get().unwrap().foo())
    }

    fn another(&self) -> String {
        format!("{} bar", self.another_foo.get().unwrap().foo())
    }
}

#[test]
fn test_qualifier_resolution() {
    let context = AppContext::new();

    context
        .component::<dyn QualifiedFoo>(Arc::new(FirstFooImpl), vec![name(&["first"])])
        .unwrap();
    context
        .component::<dyn QualifiedFoo>(Arc::new(SecondFooImpl), vec![name(&["second", "another"])])
        .unwrap();
    let qualified = context
        .component::<dyn QualifiedBar>(
            Arc::new(QualifiedBarImpl {
                first_foo: context.autowire(vec![name(&["first"])]),
                second_foo: context.autowire(vec![name(&["second"])]),
                another_foo: context.autowire(vec![name(&["another"])]),
            }),
            vec![],
        )
        .unwrap();

    assert_eq!(qualified.first(), "first foo bar");
    assert_eq!(qualified.second(), "second foo bar");
    assert_eq!(qualified.another(), "second foo bar");
}

#[test]
fn test_default_binding_satisfies_named_query() {
    let context = AppContext::new();

    // 未声明限定名的组件满足任意限定名的查询
    context
        .component::<dyn QualifiedFoo>(Arc::new(FirstFooImpl), vec![])
        .unwrap();

    let by_name = context
        .autowire::<dyn QualifiedFoo>(vec![name(&["whatever"])])
        .get()
        .unwrap();
    assert_eq!(by_name.foo(), "first foo");
}

#[test]
fn test_explicit_default_qualifier_behaves_like_unnamed() {
    let context = AppContext::new();

    context
        .component::<dyn QualifiedFoo>(Arc::new(SecondFooImpl), vec![name(&[])])
        .unwrap();

    let by_name = context
        .autowire::<dyn QualifiedFoo>(vec![name(&["second"])])
        .get()
        .unwrap();
    assert_eq!(by_name.foo(), "second foo");
}

#[test]
fn test_default_binding_conflicts_with_named_registration() {
    let context = AppContext::new();

    // 默认绑定对同类型的任何后续注册都构成重复
    context
        .component::<dyn QualifiedFoo>(Arc::new(FirstFooImpl), vec![])
        .unwrap();
    let named = context
        .component::<dyn QualifiedFoo>(Arc::new(SecondFooImpl), vec![name(&["second"])]);

    assert!(matches!(named, Err(BeanError::Duplicate { .. })));
}

#[test]
fn test_disjoint_qualifiers_coexist() {
    let context = AppContext::new();

    context
        .component::<dyn QualifiedFoo>(Arc::new(FirstFooImpl), vec![name(&["first"])])
        .unwrap();
    context
        .component::<dyn QualifiedFoo>(Arc::new(SecondFooImpl), vec![name(&["second"])])
        .unwrap();

    assert_eq!(context.stats().registered_beans, 2);

    let missing = context
        .autowire::<dyn QualifiedFoo>(vec![name(&["third"])])
        .get();
    assert!(matches!(missing, Err(BeanError::NotFound { .. })));
}

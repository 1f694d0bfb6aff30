//! # 循环依赖演示
//!
//! 两个组件互相持有对方契约的解析句柄：句柄在构造时不做查找，
//! 双方都注册完成之后才发生首次解析，因此注册顺序无关紧要。

use anyhow::Result;
use beanwire::{Autowired, BeanResult};
use std::sync::Arc;
use tracing::info;

trait Foo: Send + Sync {
    fn do_foo(&self) -> String;
    fn run(&self) -> BeanResult<String>;
}

trait Bar: Send + Sync {
    fn do_bar(&self) -> String;
    fn run(&self) -> BeanResult<String>;
}

struct FooImpl {
    bar: Autowired<dyn Bar>,
}

struct BarImpl {
    foo: Autowired<dyn Foo>,
}

impl Foo for FooImpl {
    fn do_foo(&self) -> String {
        "foo;".to_string()
    }

    fn run(&self) -> BeanResult<String> {
        Ok(format!("foo;{}", self.bar.get()?.do_bar()))
    }
}

impl Bar for BarImpl {
    fn do_bar(&self) -> String {
        "bar;".to_string()
    }

    fn run(&self) -> BeanResult<String> {
        Ok(format!("bar;{}", self.foo.get()?.do_foo()))
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    info!("装配互相依赖的组件");

    let foo = beanwire::component::<dyn Foo>(
        Arc::new(FooImpl {
            bar: beanwire::autowire(vec![]),
        }),
        vec![],
    )?;
    let bar = beanwire::component::<dyn Bar>(
        Arc::new(BarImpl {
            foo: beanwire::autowire(vec![]),
        }),
        vec![],
    )?;

    // 装配阶段结束，先校验再使用
    beanwire::validate()?;

    println!("{}", foo.run()?);
    println!("{}", bar.run()?);
    assert_eq!(foo.run()?, "foo;bar;");

    beanwire::release();
    info!("演示结束");
    Ok(())
}

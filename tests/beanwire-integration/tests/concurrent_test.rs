//! 并发访问的集成测试
//!
//! 注册独占加锁、扫描共享加锁、记忆化快路径无锁；
//! 并发首次解析只会产生一次扫描结果。

use beanwire::{name, AppContext, BeanError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

trait Counter: Send + Sync {
    fn value(&self) -> u64;
}

struct FixedCounter(u64);

impl Counter for FixedCounter {
    fn value(&self) -> u64 {
        self.0
    }
}

#[test]
fn test_concurrent_first_resolution_yields_single_instance() {
    let context = AppContext::new();
    context
        .component::<dyn Counter>(Arc::new(FixedCounter(7)), vec![])
        .unwrap();

    let wired = context.autowire::<dyn Counter>(vec![]);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let wired = wired.clone();
            thread::spawn(move || wired.get().unwrap())
        })
        .collect();

    let resolved: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    let first = &resolved[0];
    assert_eq!(first.value(), 7);
    for other in &resolved[1..] {
        assert!(Arc::ptr_eq(first, other));
    }
}

#[test]
fn test_parallel_registration_under_distinct_qualifiers() {
    let context = AppContext::new();

    let registrars: Vec<_> = (0..4)
        .map(|index| {
            let context = context.clone();
            thread::spawn(move || {
                let alias = format!("worker-{index}");
                context
                    .component::<dyn Counter>(
                        Arc::new(FixedCounter(index)),
                        vec![name(&[alias.as_str()])],
                    )
                    .unwrap();
            })
        })
        .collect();
    for registrar in registrars {
        registrar.join().unwrap();
    }

    assert_eq!(context.stats().registered_beans, 4);
    let all = context.autowire_all::<dyn Counter>(vec![]).get().unwrap();
    assert_eq!(all.len(), 4);
}

#[test]
fn test_resolution_races_with_registration() {
    let context = AppContext::new();
    let wired = context.autowire::<dyn Counter>(vec![]);

    let registrar = {
        let context = context.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(10));
            context
                .component::<dyn Counter>(Arc::new(FixedCounter(42)), vec![])
                .unwrap();
        })
    };

    // 未找到的失败不会被缓存，注册完成后重试必然成功
    let mut resolved = None;
    for _ in 0..1000 {
        match wired.get() {
            Ok(counter) => {
                resolved = Some(counter);
                break;
            }
            Err(BeanError::NotFound { .. }) => thread::sleep(Duration::from_millis(1)),
            Err(other) => panic!("意外错误: {other}"),
        }
    }
    registrar.join().unwrap();

    assert_eq!(resolved.expect("解析应在注册后成功").value(), 42);
}

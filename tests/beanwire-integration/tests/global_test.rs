//! 进程级默认注册表的集成测试
//!
//! 默认实例在整个测试二进制内共享，生命周期语义集中在
//! 单个用例里按顺序验证，结束时显式释放。

use beanwire::{Autowired, BeanError};
use std::sync::Arc;

trait Clock: Send + Sync {
    fn now(&self) -> u64;
}

struct FrozenClock;

impl Clock for FrozenClock {
    fn now(&self) -> u64 {
        1_700_000_000
    }
}

#[test]
fn test_global_context_lifecycle() {
    // 注册前创建的句柄在注册后可解析
    let early: Autowired<dyn Clock> = beanwire::autowire(vec![]);
    assert!(matches!(early.get(), Err(BeanError::NotFound { .. })));

    let clock = beanwire::component::<dyn Clock>(Arc::new(FrozenClock), vec![]).unwrap();
    assert_eq!(clock.now(), 1_700_000_000);
    assert_eq!(early.get().unwrap().now(), 1_700_000_000);

    beanwire::validate().unwrap();
    assert_eq!(beanwire::global().stats().registered_beans, 1);

    // 显式释放后注册表回到空状态，新句柄解析失败
    beanwire::release();
    assert_eq!(beanwire::global().stats().registered_beans, 0);
    assert_eq!(beanwire::global().stats().pending_validators, 0);

    let fresh: Autowired<dyn Clock> = beanwire::autowire(vec![]);
    assert!(matches!(fresh.get(), Err(BeanError::NotFound { .. })));

    // 已记忆化的旧句柄不受释放影响，仍返回缓存实例
    assert_eq!(early.get().unwrap().now(), 1_700_000_000);

    beanwire::reset();
}

//! 契约声明宏
//!
//! 把具体类型到契约类型的 unsized 转换包装成描述符，
//! 避免调用方手写转换闭包。

/// 声明类型覆盖的宏形式
///
/// `contract!(FooImpl => dyn Foo)` 等价于以 `dyn Foo` 作为声明类型
/// 注册 `FooImpl` 实例。
#[macro_export]
macro_rules! contract {
    ($concrete:ty => $target:ty) => {
        $crate::contract(
            |bean: ::std::sync::Arc<$concrete>| -> ::std::sync::Arc<$target> { bean },
        )
    };
}

/// 契约表追加的宏形式
///
/// `conforms!(FooImpl => dyn Foo)` 声明 `FooImpl` 满足契约 `dyn Foo`，
/// 使开启通配的 `dyn Foo` 查询能够命中该定义。
#[macro_export]
macro_rules! conforms {
    ($concrete:ty => $target:ty) => {
        $crate::conforms(
            |bean: ::std::sync::Arc<$concrete>| -> ::std::sync::Arc<$target> { bean },
        )
    };
}

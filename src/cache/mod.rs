//! 对象缓存
//!
//! 后端通过 `declare_object_cache_plugin!` 在进程启动时注册，按配置名选择。

pub mod object_cache;
pub mod register;

use async_trait::async_trait;

/// 缓存查询结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
    /// 后端出错，无法判断键是否存在
    ExistsButNoValue,
}

impl<T> CacheResult<T> {
    pub fn found(self) -> Option<T> {
        match self {
            CacheResult::Found(value) => Some(value),
            _ => None,
        }
    }
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    /// `ttl` 为 0 时使用默认过期时间
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
    async fn invalidate_all(&self);
}

/// 缓存用户信息的键，按用户 ID 区分以便管理员修改账号后立即失效
pub fn user_cache_key(user_id: i64) -> String {
    format!("user:{user_id}")
}

/// 注册缓存后端插件
///
/// 后端类型需要提供 `fn new() -> Result<Self, String>`。
#[macro_export]
macro_rules! declare_object_cache_plugin {
    ($name:expr, $ty:ty) => {
        #[::ctor::ctor]
        fn __register_object_cache_plugin() {
            $crate::cache::register::register_object_cache_plugin(
                $name,
                ::std::sync::Arc::new(|| {
                    ::std::boxed::Box::pin(async {
                        <$ty>::new()
                            .map(|cache| {
                                ::std::boxed::Box::new(cache)
                                    as ::std::boxed::Box<dyn $crate::cache::ObjectCache>
                            })
                            .map_err($crate::errors::EvolvError::cache_connection)
                    })
                }),
            );
        }
    };
}

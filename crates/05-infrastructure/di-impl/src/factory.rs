//! 服务工厂表

use di_abstractions::DeferredConstructor;
use infrastructure_common::ConventionResult;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// 按名称索引的服务工厂表
///
/// 构建完成后不可修改；每个条目在被调用时才向容器解析实例。
pub struct ServiceFactory<S: ?Sized, E> {
    constructors: HashMap<String, DeferredConstructor<S, E>>,
}

impl<S: ?Sized, E> ServiceFactory<S, E> {
    /// 获取延迟构造函数
    pub fn get(&self, key: &str) -> Option<&DeferredConstructor<S, E>> {
        self.constructors.get(key)
    }

    /// 按键创建服务实例，键不存在时返回 `None`
    pub fn create(&self, key: &str) -> Option<ConventionResult<Arc<S>, E>> {
        self.constructors.get(key).map(|constructor| constructor())
    }

    /// 是否包含指定键
    pub fn contains_key(&self, key: &str) -> bool {
        self.constructors.contains_key(key)
    }

    /// 所有键（按字母排序）
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<_> = self.constructors.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// 条目数量
    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    /// 工厂表是否为空
    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

impl<S: ?Sized, E> FromIterator<(String, DeferredConstructor<S, E>)> for ServiceFactory<S, E> {
    fn from_iter<I: IntoIterator<Item = (String, DeferredConstructor<S, E>)>>(iter: I) -> Self {
        Self {
            constructors: iter.into_iter().collect(),
        }
    }
}

impl<S: ?Sized, E> fmt::Debug for ServiceFactory<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceFactory")
            .field("keys", &self.keys())
            .finish()
    }
}

//! 端点选择
//!
//! 每个描述符按 scheme 优先级至多选出一个 URI，选出的 URI 汇总为可重复的端点集合

use http::Uri;
use std::collections::HashMap;
use std::collections::hash_map;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::discovery::descriptor::ServiceDescriptor;
use crate::error::{ErrorBuilder, ErrorCode, FlareError, Result};

/// 端点
///
/// 保留宣告时的原始文本（去掉首尾空白），相等、哈希和排序都按原始文本进行。
/// 解析后的 [`Uri`] 只用于校验和访问各个组成部分。
#[derive(Debug, Clone)]
pub struct Endpoint {
    raw: String,
    uri: Uri,
}

impl Endpoint {
    /// 解析一个绝对 URI（必须包含 scheme 和 authority）
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let uri: Uri = raw.parse()?;
        if uri.scheme().is_none() || uri.authority().is_none() {
            return Err(ErrorBuilder::new(
                ErrorCode::InvalidAnnouncement,
                "announcement is not an absolute uri",
            )
            .param("uri", raw)
            .build_error());
        }
        Ok(Self {
            raw: raw.to_string(),
            uri,
        })
    }

    /// 宣告的原始文本
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn into_uri(self) -> Uri {
        self.uri
    }
}

impl PartialEq for Endpoint {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Endpoint {}

impl Hash for Endpoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl PartialOrd for Endpoint {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Endpoint {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for Endpoint {
    type Err = FlareError;

    fn from_str(s: &str) -> Result<Self> {
        Endpoint::parse(s)
    }
}

impl AsRef<str> for Endpoint {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

/// 端点选择器
///
/// 按配置的 scheme 顺序，返回描述符中第一个存在且可解析的宣告 URI。
/// 一个都没有时该描述符不贡献任何端点。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointSelector {
    scheme_preference: Vec<String>,
}

impl EndpointSelector {
    pub fn new<I, S>(scheme_preference: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            scheme_preference: scheme_preference
                .into_iter()
                .map(|s| s.as_ref().trim().to_ascii_lowercase())
                .collect(),
        }
    }

    pub fn scheme_preference(&self) -> &[String] {
        &self.scheme_preference
    }

    /// 为单个描述符选择端点
    pub fn select(&self, descriptor: &ServiceDescriptor) -> Option<Endpoint> {
        for scheme in &self.scheme_preference {
            let Some(raw) = descriptor.announcement(scheme) else {
                continue;
            };
            match Endpoint::parse(raw) {
                Ok(endpoint) => return Some(endpoint),
                Err(e) => {
                    tracing::debug!(
                        descriptor_id = %descriptor.id,
                        scheme = %scheme,
                        uri = %raw,
                        error = %e,
                        "Ignoring unparsable announcement"
                    );
                }
            }
        }
        None
    }
}

impl Default for EndpointSelector {
    fn default() -> Self {
        Self::new(["https", "http"])
    }
}

/// 端点集合（多重集）
///
/// 相同 URI 文本出现多次时保留重数，不做去重。
/// 文本不同的 URI 即使指向同一地址（例如末尾是否带 `/`）也分别计数。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointSet {
    counts: HashMap<Endpoint, usize>,
    len: usize,
}

impl EndpointSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 加入一个端点，重数加一
    pub fn insert(&mut self, endpoint: Endpoint) {
        *self.counts.entry(endpoint).or_insert(0) += 1;
        self.len += 1;
    }

    /// 某个端点的重数
    pub fn count(&self, endpoint: &Endpoint) -> usize {
        self.counts.get(endpoint).copied().unwrap_or(0)
    }

    pub fn contains(&self, endpoint: &Endpoint) -> bool {
        self.counts.contains_key(endpoint)
    }

    /// 总数（计入重数）
    pub fn len(&self) -> usize {
        self.len
    }

    /// 不同 URI 的个数
    pub fn distinct_len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// 遍历 (端点, 重数)
    pub fn iter(&self) -> hash_map::Iter<'_, Endpoint, usize> {
        self.counts.iter()
    }

    /// 按重数展开遍历
    pub fn iter_expanded(&self) -> impl Iterator<Item = &Endpoint> + '_ {
        self.counts
            .iter()
            .flat_map(|(endpoint, count)| std::iter::repeat_n(endpoint, *count))
    }
}

impl FromIterator<Endpoint> for EndpointSet {
    fn from_iter<T: IntoIterator<Item = Endpoint>>(iter: T) -> Self {
        let mut set = EndpointSet::new();
        for endpoint in iter {
            set.insert(endpoint);
        }
        set
    }
}

impl Extend<Endpoint> for EndpointSet {
    fn extend<T: IntoIterator<Item = Endpoint>>(&mut self, iter: T) {
        for endpoint in iter {
            self.insert(endpoint);
        }
    }
}

impl<'a> IntoIterator for &'a EndpointSet {
    type Item = (&'a Endpoint, &'a usize);
    type IntoIter = hash_map::Iter<'a, Endpoint, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.iter()
    }
}

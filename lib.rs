//! geoindex：二维 R-tree 与基于能力契约的增量最近邻搜索
//!
//! - [`rtree`]：存储引擎（插入、分裂、删除重插、范围搜索）
//! - [`index`]：通用空间索引接口、最小堆与 `nearby` 遍历，以及调试渲染
//! - [`algo`]：默认的盒距离度量
//! - [`config`] / [`error`]：配置与外围错误类型

pub mod algo;
pub mod config;
pub mod error;
pub mod index;
pub mod rtree;

// 重新导出主要的公共接口
pub use crate::config::{GeoIndexConfig, LoggingConfig, TreeConfig};
pub use crate::error::{GeoIndexError, Result};
pub use crate::index::{Child, GeoIndex, NearbyQueue, Neighbor, Payload, SpatialIndex};
pub use crate::rtree::{Entry, Node, RTree, Rectangle};

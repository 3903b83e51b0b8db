//! 通用空间索引接口与增量最近邻搜索
//!
//! - interface: 任意树参与最近邻遍历所需的最小操作集合
//! - queue: 按距离排序的最小堆
//! - nearby: 基于最小堆的最佳优先遍历
//! - debug: 通过 children 原语把树渲染成 SVG / JSON

pub mod debug;
mod interface;
mod nearby;
mod queue;

pub use interface::{Child, Payload, SpatialIndex};
pub use nearby::{GeoIndex, Neighbor};
pub use queue::NearbyQueue;

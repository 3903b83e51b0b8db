use derive_more::Display;
use serde::{Deserialize, Serialize};

/// 轴对齐矩形边界框 - 用于表示R-tree中的最小边界矩形(MBR)
///
/// min == max 的退化矩形用来表示点
#[derive(Debug, Display, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[display(fmt = "Rectangle {{ min: {:?}, max: {:?} }}", min, max)]
pub struct Rectangle {
    pub min: [f64; 2], // [x_min, y_min]
    pub max: [f64; 2], // [x_max, y_max]
}

impl Rectangle {
    /// 创建新的矩形
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        assert!(x_min <= x_max && y_min <= y_max, "Invalid rectangle bounds");
        Rectangle {
            min: [x_min, y_min],
            max: [x_max, y_max],
        }
    }

    /// 由最小、最大坐标对创建矩形
    pub fn from_corners(min: [f64; 2], max: [f64; 2]) -> Self {
        Self::new(min[0], min[1], max[0], max[1])
    }

    /// 创建一个点矩形
    pub fn from_point(x: f64, y: f64) -> Self {
        Rectangle {
            min: [x, y],
            max: [x, y],
        }
    }

    /// 计算矩形面积
    pub fn area(&self) -> f64 {
        (self.max[0] - self.min[0]) * (self.max[1] - self.min[1])
    }

    /// 计算两个矩形的并集MBR
    pub fn union(&self, other: &Rectangle) -> Rectangle {
        Rectangle {
            min: [self.min[0].min(other.min[0]), self.min[1].min(other.min[1])],
            max: [self.max[0].max(other.max[0]), self.max[1].max(other.max[1])],
        }
    }

    /// 原地扩展当前矩形以包含另一个矩形
    pub fn expand(&mut self, other: &Rectangle) {
        if other.min[0] < self.min[0] {
            self.min[0] = other.min[0];
        }
        if other.max[0] > self.max[0] {
            self.max[0] = other.max[0];
        }
        if other.min[1] < self.min[1] {
            self.min[1] = other.min[1];
        }
        if other.max[1] > self.max[1] {
            self.max[1] = other.max[1];
        }
    }

    /// 判断两个矩形是否相交（边界接触也算相交）
    pub fn intersects(&self, other: &Rectangle) -> bool {
        self.min[0] <= other.max[0]
            && self.max[0] >= other.min[0]
            && self.min[1] <= other.max[1]
            && self.max[1] >= other.min[1]
    }

    /// 判断当前矩形是否完全包含另一个矩形
    pub fn contains(&self, other: &Rectangle) -> bool {
        self.min[0] <= other.min[0]
            && self.min[1] <= other.min[1]
            && self.max[0] >= other.max[0]
            && self.max[1] >= other.max[1]
    }

    /// 计算扩大到包含另一个矩形所需的面积增量
    pub fn enlargement(&self, other: &Rectangle) -> f64 {
        self.union(other).area() - self.area()
    }

    /// 判断 other 是否贴在当前矩形的某条边上
    ///
    /// 删除贴边的条目后，父节点的MBR可能收缩，需要重新计算
    pub fn on_edge(&self, other: &Rectangle) -> bool {
        self.min[0] == other.min[0]
            || self.max[0] == other.max[0]
            || self.min[1] == other.min[1]
            || self.max[1] == other.max[1]
    }

    /// 返回跨度最大的轴（0 = x, 1 = y）及其长度，相等时取 x
    pub fn largest_axis(&self) -> (usize, f64) {
        let width = self.max[0] - self.min[0];
        let height = self.max[1] - self.min[1];
        if height > width {
            (1, height)
        } else {
            (0, width)
        }
    }

    /// 判断矩形是否为点（宽度和高度都为0）
    pub fn is_point(&self) -> bool {
        self.min[0] == self.max[0] && self.min[1] == self.max[1]
    }
}

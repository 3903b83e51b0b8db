//! 距离度量
//!
//! `nearby` 的默认距离函数：两个矩形之间逐轴截断距离的平方和。
//! 对任意节点，它的值不会大于其任意后代条目的值，满足最近邻遍历要求的单调性。

use crate::rtree::Rectangle;

/// 经度方向的周期
const WRAP_SPAN: f64 = 360.0;

/// 两个矩形之间的平方盒距离
///
/// 每个轴上 `gap = max(a.min, b.min) - min(a.max, b.max)`，仅当 gap > 0 时累加 gap²。
/// 重叠或接触的轴贡献 0。不做任何经度回绕处理。
pub fn box_dist(a: &Rectangle, b: &Rectangle) -> f64 {
    axis_gap_sq(a.min[0], a.max[0], b.min[0], b.max[0])
        + axis_gap_sq(a.min[1], a.max[1], b.min[1], b.max[1])
}

/// 可选回绕的平方盒距离
///
/// `wrap` 为 true 时，x 轴（经度）上还会把 `b` 平移 ±360 再比较，取三者中的最小值，
/// 使得跨越反子午线的两个点距离正确；为 false 时与 [`box_dist`] 完全相同。
pub fn box_dist_calc(a: &Rectangle, b: &Rectangle, wrap: bool) -> f64 {
    let y = axis_gap_sq(a.min[1], a.max[1], b.min[1], b.max[1]);
    let mut x = axis_gap_sq(a.min[0], a.max[0], b.min[0], b.max[0]);
    if wrap {
        for shift in [-WRAP_SPAN, WRAP_SPAN] {
            x = x.min(axis_gap_sq(
                a.min[0],
                a.max[0],
                b.min[0] + shift,
                b.max[0] + shift,
            ));
        }
    }
    x + y
}

fn axis_gap_sq(a_min: f64, a_max: f64, b_min: f64, b_max: f64) -> f64 {
    let gap = a_min.max(b_min) - a_max.min(b_max);
    if gap > 0.0 {
        gap * gap
    } else {
        0.0
    }
}

/// 以 `target` 为查询对象的默认距离函数，可直接作为 `nearby` 的 `algo` 参数
pub fn simple_box<P>(target: Rectangle) -> impl Fn(&Rectangle, P) -> f64 {
    move |rect: &Rectangle, _: P| box_dist(&target, rect)
}

/// 与 [`simple_box`] 相同，但在经度方向回绕
pub fn wrapped_box<P>(target: Rectangle) -> impl Fn(&Rectangle, P) -> f64 {
    move |rect: &Rectangle, _: P| box_dist_calc(&target, rect, true)
}

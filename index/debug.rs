//! 调试渲染
//!
//! 只通过 `children` 原语读取树结构，不依赖任何具体树的内部实现：
//! - `svg()`：在 WGS84 坐标空间中画出每一层的边界矩形
//! - `export_to_json()`：导出树结构，用于前端可视化

use super::interface::{Child, Payload, SpatialIndex};
use super::nearby::GeoIndex;
use crate::rtree::Rectangle;
use serde::Serialize;

/// SVG 坐标缩放倍数
const SVG_SCALE: f64 = 4.0;

/// 按深度循环使用的描边颜色
const STROKES: [&str; 5] = ["black", "#cccc00", "green", "red", "purple"];

/// 用于JSON序列化的树结构
#[derive(Debug, Serialize)]
pub struct TreeVisualization<'a, T> {
    /// 根节点中的条目
    pub root_children: Vec<NodeVisualization<'a, T>>,
    /// 数据条目总数
    pub len: usize,
    /// 整棵树的边界，空树为 null
    pub bounds: Option<Rectangle>,
}

/// 用于JSON序列化的节点结构
#[derive(Debug, Serialize)]
pub struct NodeVisualization<'a, T> {
    /// 节点的最小边界矩形
    pub mbr: Rectangle,
    /// 深度，根节点中的条目为 1
    pub depth: usize,
    /// 数据条目
    pub data_entries: Vec<DataEntry<'a, T>>,
    /// 子节点
    pub child_nodes: Vec<NodeVisualization<'a, T>>,
}

/// 用于JSON序列化的数据条目
#[derive(Debug, Serialize)]
pub struct DataEntry<'a, T> {
    pub mbr: Rectangle,
    pub data: &'a T,
}

impl<S: SpatialIndex> GeoIndex<S> {
    /// 以 SVG 格式输出整棵树
    ///
    /// 坐标按 WGS84 范围布局，y 轴翻转；每层使用不同的描边颜色，点条目画成圆角矩形
    pub fn svg(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "<svg viewBox=\"{:.0} {:.0} {:.0} {:.0}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
            -190.0 * SVG_SCALE,
            -100.0 * SVG_SCALE,
            380.0 * SVG_SCALE,
            190.0 * SVG_SCALE
        ));
        out.push_str("<g transform=\"scale(1,-1)\">\n");

        let mut children = Vec::new();
        self.inner().children(None, &mut children);
        for child in children {
            self.svg_child(child, 1, &mut out);
        }

        out.push_str("</g>\n");
        out.push_str("</svg>\n");
        out
    }

    fn svg_child<'a>(
        &'a self,
        child: Child<'a, S::Item, S::Handle<'a>>,
        depth: usize,
        out: &mut String,
    ) {
        let rect = child.rect;
        let stroke = STROKES[depth % STROKES.len()];
        let corner = if rect.is_point() {
            " rx=\"15\" ry=\"15\""
        } else {
            ""
        };
        out.push_str(&format!(
            "<rect x=\"{:.0}\" y=\"{:.0}\" width=\"{:.0}\" height=\"{:.0}\" \
             stroke=\"{}\" fill=\"purple\" fill-opacity=\"0\" stroke-opacity=\"1\"{}/>\n",
            rect.min[0] * SVG_SCALE,
            rect.min[1] * SVG_SCALE,
            (rect.max[0] - rect.min[0]) * SVG_SCALE + 1.0,
            (rect.max[1] - rect.min[1]) * SVG_SCALE + 1.0,
            stroke,
            corner
        ));

        if let Payload::Node(handle) = child.payload {
            let mut children = Vec::new();
            self.inner().children(Some(handle), &mut children);
            for grandchild in children {
                self.svg_child(grandchild, depth + 1, out);
            }
        }
    }

    /// 导出树结构为JSON格式
    ///
    /// 返回包含完整树结构的JSON字符串，用于前端可视化
    pub fn export_to_json(&self) -> crate::Result<String>
    where
        S::Item: Serialize,
    {
        let visualization = self.create_tree_visualization();
        Ok(serde_json::to_string_pretty(&visualization)?)
    }

    /// 创建用于可视化的树结构
    pub fn create_tree_visualization(&self) -> TreeVisualization<'_, S::Item> {
        let mut children = Vec::new();
        self.inner().children(None, &mut children);

        let mut root = self.create_node_visualization(
            self.bounds().unwrap_or_else(|| Rectangle::from_point(0.0, 0.0)),
            0,
            children,
        );
        // 根节点中直接存放的数据条目包装成一个虚拟节点，保证所有条目都能导出
        let mut root_children = std::mem::take(&mut root.child_nodes);
        if !root.data_entries.is_empty() {
            root.depth = 1;
            root_children.push(root);
        }

        TreeVisualization {
            root_children,
            len: self.len(),
            bounds: self.bounds(),
        }
    }

    /// 递归创建节点的可视化结构
    fn create_node_visualization<'a>(
        &'a self,
        mbr: Rectangle,
        depth: usize,
        children: Vec<Child<'a, S::Item, S::Handle<'a>>>,
    ) -> NodeVisualization<'a, S::Item> {
        let mut data_entries = Vec::new();
        let mut child_nodes = Vec::new();

        for child in children {
            match child.payload {
                Payload::Item(data) => data_entries.push(DataEntry {
                    mbr: child.rect,
                    data,
                }),
                Payload::Node(handle) => {
                    let mut grandchildren = Vec::new();
                    self.inner().children(Some(handle), &mut grandchildren);
                    child_nodes.push(self.create_node_visualization(
                        child.rect,
                        depth + 1,
                        grandchildren,
                    ));
                }
            }
        }

        NodeVisualization {
            mbr,
            depth,
            data_entries,
            child_nodes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rtree::RTree;

    fn sample_index(count: usize) -> GeoIndex<RTree<String>> {
        let mut index = GeoIndex::new(RTree::new(4));
        for i in 0..count {
            let x = (i as f64) * 10.0 - 90.0;
            let y = (i as f64) * 5.0 - 45.0;
            if i % 2 == 0 {
                index.insert(Rectangle::from_point(x, y), format!("p{}", i));
            } else {
                index.insert(Rectangle::new(x, y, x + 5.0, y + 5.0), format!("r{}", i));
            }
        }
        index
    }

    fn count_entries<T>(node: &NodeVisualization<'_, T>) -> usize {
        node.data_entries.len() + node.child_nodes.iter().map(count_entries).sum::<usize>()
    }

    #[test]
    fn test_svg_empty_tree() {
        let index: GeoIndex<RTree<String>> = GeoIndex::new(RTree::default());
        let svg = index.svg();
        assert!(svg.starts_with("<svg viewBox=\"-760 -400 1520 760\""));
        assert!(svg.contains("<g transform=\"scale(1,-1)\">"));
        assert!(!svg.contains("<rect"));
        assert!(svg.ends_with("</g>\n</svg>\n"));
    }

    #[test]
    fn test_svg_draws_every_entry() {
        let index = sample_index(20);
        let svg = index.svg();

        // 每个数据条目一个矩形，再加上各层节点
        let rects = svg.matches("<rect").count();
        assert!(rects > 20);
        // 点条目使用圆角
        assert!(svg.matches("rx=\"15\"").count() >= 10);
        assert!(svg.contains("stroke=\"#cccc00\""));
        assert!(svg.contains("stroke=\"green\""));
    }

    #[test]
    fn test_json_export_complex_tree() {
        let index = sample_index(10);
        let json = index.export_to_json().expect("Failed to export JSON");

        assert!(json.contains("\"len\": 10"));
        assert!(json.contains("\"p0\""));
        assert!(json.contains("\"r9\""));

        let visualization = index.create_tree_visualization();
        let total: usize = visualization.root_children.iter().map(count_entries).sum();
        assert_eq!(total, 10);
        assert!(visualization.root_children.iter().all(|node| node.depth == 1));
    }

    #[test]
    fn test_json_export_leaf_root() {
        let mut index = GeoIndex::new(RTree::default());
        index.insert(Rectangle::from_point(1.0, 2.0), 7u32);
        index.insert(Rectangle::from_point(3.0, 4.0), 8u32);

        let visualization = index.create_tree_visualization();
        assert_eq!(visualization.root_children.len(), 1);
        assert_eq!(visualization.root_children[0].data_entries.len(), 2);

        let value: serde_json::Value =
            serde_json::from_str(&index.export_to_json().unwrap()).unwrap();
        assert_eq!(value["len"], 2);
        assert_eq!(value["bounds"]["min"][0], 1.0);
    }

    #[test]
    fn test_json_export_empty_tree() {
        let index: GeoIndex<RTree<u32>> = GeoIndex::default();
        let value: serde_json::Value =
            serde_json::from_str(&index.export_to_json().unwrap()).unwrap();
        assert_eq!(value["len"], 0);
        assert!(value["bounds"].is_null());
        assert_eq!(value["root_children"].as_array().map(Vec::len), Some(0));
    }
}

use super::super::node::{Entry, Node};
use super::super::rectangle::Rectangle;
use super::super::rtree::RTree;
use tracing::trace;

/// 插入操作相关算法
impl<T> RTree<T> {
    /// 插入新的数据条目
    ///
    /// 自顶向下选择子树直到叶子层；节点溢出（max_entries + 1）时在返回父节点之前分裂。
    /// 根节点溢出时在其上方创建新根，树高加一。
    pub fn insert(&mut self, rect: Rectangle, data: T) {
        let max_entries = self.max_entries();
        let count = self.len();

        // I1: 如果根节点不存在，创建一个以该条目为初始边界的叶子根节点
        let root = self
            .root_mut()
            .get_or_insert_with(|| Box::new(Node::new_leaf_node(rect, max_entries + 1)));

        // I2-I3: 递归下降并添加记录
        root.insert_entry(rect, data, max_entries);

        // I4: 根节点溢出，分裂后放到新的根节点下
        if root.len() > max_entries {
            let right = root.split_largest_axis_edge_snap(max_entries);
            let level = root.level + 1;
            let new_root = Box::new(Node::new_index_node(root.mbr, level, max_entries + 1));
            let left = std::mem::replace(root, new_root);
            root.entries.push(Entry::Node { node: left });
            root.entries.push(Entry::Node {
                node: Box::new(right),
            });
            root.update_mbr();
            trace!(height = level, "root split, tree grew");
        }

        self.set_count(count + 1);
    }
}

impl<T> Node<T> {
    /// 在当前子树中插入条目，返回当前节点的MBR是否因此扩大
    pub(crate) fn insert_entry(&mut self, rect: Rectangle, data: T, max_entries: usize) -> bool {
        let grown = !self.mbr.contains(&rect);

        if self.is_leaf_node() {
            self.entries.push(Entry::Data { mbr: rect, data });
        } else {
            // CL3: 选择子树
            let index = self.choose_subtree(&rect);
            let Some(child) = self.entries[index].child_mut() else {
                unreachable!("index node holds only node entries");
            };
            child.insert_entry(rect, data, max_entries);

            // 子节点溢出时在此处分裂，新节点挂到当前节点
            if child.len() > max_entries {
                let right = child.split_largest_axis_edge_snap(max_entries);
                self.entries.push(Entry::Node {
                    node: Box::new(right),
                });
            }
        }

        if grown {
            self.mbr.expand(&rect);
        }
        grown
    }

    /// 选择子树
    ///
    /// 先找完全包含 `rect` 的子条目，取面积最小者；
    /// 都不包含时取扩大面积最小者，相同时取当前面积更小的
    pub(crate) fn choose_subtree(&self, rect: &Rectangle) -> usize {
        let mut best: Option<(usize, f64)> = None;
        for (i, entry) in self.entries.iter().enumerate() {
            let mbr = entry.mbr();
            if mbr.contains(rect) {
                let area = mbr.area();
                if best.map_or(true, |(_, best_area)| area < best_area) {
                    best = Some((i, area));
                }
            }
        }
        if let Some((index, _)) = best {
            return index;
        }

        self.choose_least_enlargement(rect)
    }

    fn choose_least_enlargement(&self, rect: &Rectangle) -> usize {
        let mut best_index = 0;
        let mut min_enlargement = f64::INFINITY;
        let mut min_area = f64::INFINITY;

        for (i, entry) in self.entries.iter().enumerate() {
            let mbr = entry.mbr();
            let area = mbr.area();
            let enlargement = mbr.enlargement(rect);

            // 选择扩大面积最小的，如果相同则选择面积最小的
            if enlargement < min_enlargement || (enlargement == min_enlargement && area < min_area)
            {
                min_enlargement = enlargement;
                min_area = area;
                best_index = i;
            }
        }

        best_index
    }
}

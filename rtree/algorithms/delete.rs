use super::super::node::{Entry, Node};
use super::super::rectangle::Rectangle;
use super::super::rtree::RTree;
use tracing::{debug, trace};

/// R-tree删除算法实现
///
/// 采用简化的下溢处理：不做兄弟节点合并，而是把下溢节点整棵子树展平，
/// 等递归删除结束后再从根部逐个重新插入
impl<T: PartialEq> RTree<T> {
    /// 删除 (rect, data) 完全匹配的一个条目
    ///
    /// 返回是否真的删除了条目；不存在时什么也不做
    pub fn delete(&mut self, rect: &Rectangle, data: &T) -> bool {
        let min_entries = self.min_entries();
        let count = self.len();
        let mut reinsert = Vec::new();

        let root = self.root_mut();
        let Some(node) = root.as_deref_mut() else {
            return false;
        };
        if !node.mbr.contains(rect) {
            return false;
        }

        // D1-D3: 递归删除，收集需要重新插入的条目
        let (removed, _) = node.delete_entry(rect, data, min_entries, &mut reinsert);
        if !removed {
            return false;
        }

        // D4: 缩短树
        if node.is_empty() {
            *root = None;
        } else {
            while let Some(height) = Self::collapse_root(root) {
                trace!(height, "root collapsed");
            }
        }

        self.set_count(count - 1 - reinsert.len());

        // D5: 重新插入下溢节点中的所有条目
        if !reinsert.is_empty() {
            debug!(count = reinsert.len(), "reinserting entries from underflowed nodes");
            for (rect, data) in reinsert {
                self.insert(rect, data);
            }
        }
        true
    }

    /// 根节点是只有一个子节点的索引节点时，用该子节点替换根节点
    ///
    /// 返回替换后的树高；没有发生替换时返回 None
    fn collapse_root(root: &mut Option<Box<Node<T>>>) -> Option<usize> {
        let node = root.as_mut()?;
        if !node.is_index_node() || node.len() != 1 {
            return None;
        }
        match node.entries.pop() {
            Some(Entry::Node { node: child }) => {
                let level = child.level;
                *node = child;
                Some(level)
            }
            Some(entry) => {
                // 索引节点中不会出现数据条目
                node.entries.push(entry);
                None
            }
            None => None,
        }
    }
}

impl<T: PartialEq> Node<T> {
    /// 在当前子树中删除条目
    ///
    /// 返回 (是否删除, 当前节点的MBR是否重新计算过)。
    /// 只有被移除的条目贴在MBR边上时才需要重新计算，否则MBR不会变化
    pub(crate) fn delete_entry(
        &mut self,
        rect: &Rectangle,
        data: &T,
        min_entries: usize,
        reinsert: &mut Vec<(Rectangle, T)>,
    ) -> (bool, bool) {
        if self.is_leaf_node() {
            let Some(index) = self.entries.iter().position(|entry| match entry {
                Entry::Data {
                    mbr,
                    data: entry_data,
                } => mbr == rect && entry_data == data,
                Entry::Node { .. } => false,
            }) else {
                return (false, false);
            };

            let recalced = self.mbr.on_edge(rect);
            self.entries.swap_remove(index);
            if recalced {
                self.update_mbr();
            }
            return (true, recalced);
        }

        for i in 0..self.entries.len() {
            let Some(child) = self.entries[i].child_mut() else {
                continue;
            };
            // 只在MBR包含目标矩形的子树中查找
            if !child.mbr.contains(rect) {
                continue;
            }

            let old_mbr = child.mbr;
            let (removed, child_recalced) = child.delete_entry(rect, data, min_entries, reinsert);
            if !removed {
                continue;
            }

            let mut recalced = false;
            if child.is_empty() || child.len() < min_entries {
                // 子节点下溢：从父节点中摘除，整棵子树留待重新插入
                recalced = self.mbr.on_edge(&old_mbr);
                if let Entry::Node { node } = self.entries.swap_remove(i) {
                    trace!(level = node.level, entries = node.len(), "node underflow, flattening");
                    node.flatten_into(reinsert);
                }
            } else if child_recalced {
                recalced = self.mbr.on_edge(&old_mbr);
            }

            if recalced {
                self.update_mbr();
            }
            return (true, recalced);
        }

        (false, false)
    }
}

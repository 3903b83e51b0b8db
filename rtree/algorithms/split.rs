use super::super::node::{Entry, Node};

/// 节点分裂算法 - 最长轴贴边分裂(largest-axis edge-snap)
impl<T> Node<T> {
    /// 把溢出的节点一分为二，当前节点保留左半部分，返回右半部分
    ///
    /// 1. 选取节点MBR中跨度更大的轴
    /// 2. 每个条目比较它到该轴最小边和最大边的距离，离哪边近就归哪边
    /// 3. 距离相等的条目最后再分配，每次放进当前条目更少的一侧
    /// 4. 分别重新计算两侧的MBR
    ///
    /// 不需要排序或二次代价的种子选择；两侧都至少包含一个条目
    pub(crate) fn split_largest_axis_edge_snap(&mut self, max_entries: usize) -> Node<T> {
        let (axis, _) = self.mbr.largest_axis();
        let left_edge = self.mbr.min[axis];
        let right_edge = self.mbr.max[axis];

        let mut right = Node {
            mbr: self.mbr,
            entries: Vec::with_capacity(max_entries + 1),
            level: self.level,
        };
        let mut equals: Vec<Entry<T>> = Vec::new();

        let mut i = 0;
        while i < self.entries.len() {
            let mbr = self.entries[i].mbr();
            let min_dist = mbr.min[axis] - left_edge;
            let max_dist = right_edge - mbr.max[axis];
            if min_dist < max_dist {
                // 留在左侧
                i += 1;
                continue;
            }
            let entry = self.entries.swap_remove(i);
            if min_dist > max_dist {
                right.entries.push(entry);
            } else {
                equals.push(entry);
            }
        }

        for entry in equals {
            if self.entries.len() < right.entries.len() {
                self.entries.push(entry);
            } else {
                right.entries.push(entry);
            }
        }

        self.update_mbr();
        right.update_mbr();
        right
    }
}

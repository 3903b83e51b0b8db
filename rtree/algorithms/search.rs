use super::super::node::{Entry, Node};
use super::super::rectangle::Rectangle;
use super::super::rtree::RTree;

/// 搜索操作相关算法
impl<T> RTree<T> {
    /// 搜索与查询矩形相交的所有条目（边界接触也算相交）
    ///
    /// `visit` 返回 false 时立即停止搜索
    pub fn search<F>(&self, rect: &Rectangle, mut visit: F)
    where
        F: FnMut(&Rectangle, &T) -> bool,
    {
        if let Some(root) = self.root_ref() {
            // 根节点本身不相交时整棵树都可以跳过
            if root.mbr.intersects(rect) {
                root.search(rect, &mut visit);
            }
        }
    }

    /// 按任意顺序遍历所有条目
    ///
    /// `visit` 返回 false 时立即停止遍历
    pub fn scan<F>(&self, mut visit: F)
    where
        F: FnMut(&Rectangle, &T) -> bool,
    {
        if let Some(root) = self.root_ref() {
            root.scan(&mut visit);
        }
    }
}

impl<T> Node<T> {
    /// 递归搜索 - 只进入MBR与查询矩形相交的子树
    ///
    /// 返回 false 表示调用方要求停止
    fn search<F>(&self, rect: &Rectangle, visit: &mut F) -> bool
    where
        F: FnMut(&Rectangle, &T) -> bool,
    {
        for entry in &self.entries {
            if !entry.mbr().intersects(rect) {
                continue;
            }
            let keep_going = match entry {
                Entry::Data { mbr, data } => visit(mbr, data),
                Entry::Node { node } => node.search(rect, visit),
            };
            if !keep_going {
                return false;
            }
        }
        true
    }

    fn scan<F>(&self, visit: &mut F) -> bool
    where
        F: FnMut(&Rectangle, &T) -> bool,
    {
        for entry in &self.entries {
            let keep_going = match entry {
                Entry::Data { mbr, data } => visit(mbr, data),
                Entry::Node { node } => node.scan(visit),
            };
            if !keep_going {
                return false;
            }
        }
        true
    }
}

use super::node::{Entry, Node};
use super::rectangle::Rectangle;
use crate::config::TreeConfig;
use crate::index::{Child, Payload, SpatialIndex};

/// 默认最大条目数M
pub const DEFAULT_MAX_ENTRIES: usize = 32;

/// R-tree主结构
///
/// 叶子节点中存放用户数据 `T`；所有叶子节点位于同一深度
#[derive(Debug, Clone)]
pub struct RTree<T> {
    /// 根节点，空树时为 None
    root: Option<Box<Node<T>>>,
    /// 数据条目总数
    count: usize,
    /// 最大条目数M
    max_entries: usize,
    /// 最小条目数m（M 的 20%）
    min_entries: usize,
}

impl<T> RTree<T> {
    /// 创建新的R-tree
    pub fn new(max_entries: usize) -> Self {
        assert!(max_entries >= 2, "Max entries must be at least 2");
        let min_entries = max_entries * 20 / 100;

        RTree {
            root: None,
            count: 0,
            max_entries,
            min_entries,
        }
    }

    /// 根据配置创建R-tree
    pub fn from_config(config: &TreeConfig) -> Self {
        Self::new(config.max_entries)
    }

    /// 检查R-tree是否为空
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// 获取总的数据条目数量
    pub fn len(&self) -> usize {
        self.count
    }

    /// 获取R-tree的根节点MBR，空树返回 None
    pub fn root_mbr(&self) -> Option<&Rectangle> {
        self.root.as_ref().map(|node| &node.mbr)
    }

    /// 获取最大条目数
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// 获取最小条目数
    pub fn min_entries(&self) -> usize {
        self.min_entries
    }

    /// 树高：根到叶子层的边数，根节点直接存放数据时为0
    pub fn height(&self) -> usize {
        self.root.as_ref().map_or(0, |node| node.level)
    }

    /// 获取某个节点的直接子条目 - 惰性展开原语
    ///
    /// `parent` 为 None 时返回根节点中实际存放的条目；否则返回该节点的直接子条目。
    /// `out` 会先被清空再填充
    pub fn children<'a>(
        &'a self,
        parent: Option<&'a Node<T>>,
        out: &mut Vec<Child<'a, T, &'a Node<T>>>,
    ) {
        out.clear();
        let node = match parent {
            Some(node) => node,
            None => match self.root.as_deref() {
                Some(root) => root,
                None => return,
            },
        };

        out.extend(node.entries.iter().map(|entry| match entry {
            Entry::Data { mbr, data } => Child {
                rect: *mbr,
                payload: Payload::Item(data),
            },
            Entry::Node { node } => Child {
                rect: node.mbr,
                payload: Payload::Node(&**node),
            },
        }));
    }

    /// 内部方法：获取根节点的引用
    pub(crate) fn root_ref(&self) -> Option<&Node<T>> {
        self.root.as_deref()
    }

    /// 内部方法：获取根节点的可变引用
    pub(crate) fn root_mut(&mut self) -> &mut Option<Box<Node<T>>> {
        &mut self.root
    }

    /// 内部方法：调整计数
    pub(crate) fn set_count(&mut self, count: usize) {
        self.count = count;
    }
}

impl<T> Default for RTree<T> {
    /// 使用默认参数创建R-tree（M=32, m=6）
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES)
    }
}

impl<T: PartialEq> SpatialIndex for RTree<T> {
    type Item = T;
    type Handle<'a>
        = &'a Node<T>
    where
        Self: 'a;

    fn insert(&mut self, rect: Rectangle, data: T) {
        RTree::insert(self, rect, data);
    }

    fn delete(&mut self, rect: &Rectangle, data: &T) -> bool {
        RTree::delete(self, rect, data)
    }

    fn search<F>(&self, rect: &Rectangle, visit: F)
    where
        F: FnMut(&Rectangle, &T) -> bool,
    {
        RTree::search(self, rect, visit);
    }

    fn scan<F>(&self, visit: F)
    where
        F: FnMut(&Rectangle, &T) -> bool,
    {
        RTree::scan(self, visit);
    }

    fn len(&self) -> usize {
        self.count
    }

    fn bounds(&self) -> Option<Rectangle> {
        self.root_mbr().copied()
    }

    fn children<'a>(
        &'a self,
        parent: Option<Self::Handle<'a>>,
        out: &mut Vec<Child<'a, T, Self::Handle<'a>>>,
    ) {
        RTree::children(self, parent, out);
    }
}

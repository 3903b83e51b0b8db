use crate::rtree::Rectangle;

/// 惰性展开返回的条目内容
///
/// - `Item`：叶子层的用户数据
/// - `Node`：不透明的子节点句柄，只有提供它的树能解释，可以再交给 `children` 展开
#[derive(Debug)]
pub enum Payload<'a, T, H> {
    Item(&'a T),
    Node(H),
}

impl<'a, T, H: Copy> Clone for Payload<'a, T, H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T, H: Copy> Copy for Payload<'a, T, H> {}

impl<'a, T, H> Payload<'a, T, H> {
    /// 是否为叶子层的用户数据
    pub fn is_item(&self) -> bool {
        matches!(self, Payload::Item(_))
    }

    /// 用户数据（如果是叶子条目）
    pub fn item(&self) -> Option<&'a T> {
        match self {
            Payload::Item(data) => Some(*data),
            Payload::Node(_) => None,
        }
    }
}

/// `children` 返回的一个子条目：边界矩形 + 内容
#[derive(Debug)]
pub struct Child<'a, T, H> {
    pub rect: Rectangle,
    pub payload: Payload<'a, T, H>,
}

impl<'a, T, H: Copy> Clone for Child<'a, T, H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T, H: Copy> Copy for Child<'a, T, H> {}

/// 空间索引能力契约
///
/// 任何实现了这组操作的层次包围盒结构都可以被 [`GeoIndex`](super::GeoIndex)
/// 包装，获得 `nearby` 等通用算法，而无需访问树的内部结构。
///
/// 所有操作都不会返回错误：删除不存在的 (rect, data) 是空操作。
pub trait SpatialIndex {
    /// 用户数据类型
    type Item;

    /// 不透明的节点句柄
    type Handle<'a>: Copy
    where
        Self: 'a;

    /// 插入一条数据
    fn insert(&mut self, rect: Rectangle, data: Self::Item);

    /// 按 (rect, data) 删除一条数据，返回是否真的删除了
    fn delete(&mut self, rect: &Rectangle, data: &Self::Item) -> bool;

    /// 替换：先删除旧条目再插入新条目，旧条目不存在时等价于单纯插入
    fn replace(
        &mut self,
        old_rect: &Rectangle,
        old_data: &Self::Item,
        new_rect: Rectangle,
        new_data: Self::Item,
    ) {
        self.delete(old_rect, old_data);
        self.insert(new_rect, new_data);
    }

    /// 访问所有与 `rect` 相交（含边界接触）的数据，`visit` 返回 false 时立即停止
    fn search<F>(&self, rect: &Rectangle, visit: F)
    where
        F: FnMut(&Rectangle, &Self::Item) -> bool;

    /// 以不确定的顺序访问所有数据，`visit` 返回 false 时立即停止
    fn scan<F>(&self, visit: F)
    where
        F: FnMut(&Rectangle, &Self::Item) -> bool;

    /// 数据条目数量
    fn len(&self) -> usize;

    /// 是否为空
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 整棵树的最小边界矩形，空树返回 None
    fn bounds(&self) -> Option<Rectangle>;

    /// 惰性展开原语
    ///
    /// `parent` 为 None 时返回根节点中实际存放的条目，否则返回该句柄对应节点的直接子条目。
    /// `out` 是可复用的缓冲区，实现需要先清空再填充。
    fn children<'a>(
        &'a self,
        parent: Option<Self::Handle<'a>>,
        out: &mut Vec<Child<'a, Self::Item, Self::Handle<'a>>>,
    );
}

use super::rectangle::Rectangle;

/// R-tree节点条目
///
/// 每个条目都包含一个MBR（最小边界矩形）和对应的内容：
/// - Data条目：存储用户插入的真实数据，只出现在叶子节点中
/// - Node条目：存储子节点，只出现在索引节点中；其MBR就是子节点自身的MBR
#[derive(Debug, Clone)]
pub enum Entry<T> {
    /// 数据条目：用户数据及其边界矩形
    Data { mbr: Rectangle, data: T },

    /// 节点条目：指向子节点的Box智能指针
    Node { node: Box<Node<T>> },
}

impl<T> Entry<T> {
    /// 获取条目的MBR
    ///
    /// 无论是数据条目还是节点条目，都有对应的MBR
    pub fn mbr(&self) -> &Rectangle {
        match self {
            Entry::Data { mbr, .. } => mbr,
            Entry::Node { node } => &node.mbr,
        }
    }

    /// 检查是否为数据条目
    pub fn is_data(&self) -> bool {
        matches!(self, Entry::Data { .. })
    }

    /// 获取数据条目的数据引用（如果是数据条目）
    pub fn data(&self) -> Option<&T> {
        match self {
            Entry::Data { data, .. } => Some(data),
            Entry::Node { .. } => None,
        }
    }

    /// 获取节点条目的子节点引用（如果是节点条目）
    pub fn child(&self) -> Option<&Node<T>> {
        match self {
            Entry::Data { .. } => None,
            Entry::Node { node } => Some(node),
        }
    }

    /// 获取节点条目的子节点可变引用（如果是节点条目）
    pub fn child_mut(&mut self) -> Option<&mut Node<T>> {
        match self {
            Entry::Data { .. } => None,
            Entry::Node { node } => Some(node),
        }
    }
}

/// R-tree节点
///
/// 一个节点内的条目要么全部是数据条目（叶子节点），要么全部是节点条目（索引节点），
/// 不会混合出现
#[derive(Debug, Clone)]
pub struct Node<T> {
    /// 节点的最小边界矩形，始终是所有条目MBR的紧致并集
    pub mbr: Rectangle,

    /// 节点包含的条目列表
    ///
    /// 分裂之前可能短暂地持有 max_entries + 1 个条目
    pub entries: Vec<Entry<T>>,

    /// 节点在树中的层级
    ///
    /// 叶子节点的层级为0，根节点层级最高（等于树高）
    pub level: usize,
}

impl<T> Node<T> {
    /// 创建新的叶子节点
    ///
    /// `mbr` 是初始边界，通常是第一个将要插入的条目的MBR
    pub fn new_leaf_node(mbr: Rectangle, capacity: usize) -> Self {
        Self::new(mbr, 0, capacity)
    }

    /// 创建新的索引节点
    ///
    /// # 参数
    /// * `level` - 节点在树中的层级，必须 > 0
    pub fn new_index_node(mbr: Rectangle, level: usize, capacity: usize) -> Self {
        debug_assert!(level > 0, "index node must sit above the leaf level");
        Self::new(mbr, level, capacity)
    }

    fn new(mbr: Rectangle, level: usize, capacity: usize) -> Self {
        Node {
            mbr,
            entries: Vec::with_capacity(capacity),
            level,
        }
    }

    /// 检查是否为叶子节点
    pub fn is_leaf_node(&self) -> bool {
        self.level == 0
    }

    /// 检查是否为索引节点
    pub fn is_index_node(&self) -> bool {
        self.level > 0
    }

    /// 条目数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 节点是否没有任何条目
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 根据所有条目重新计算节点的MBR
    ///
    /// 空节点保留原有的MBR（空节点随后总会被移除或丢弃）
    pub fn update_mbr(&mut self) {
        let mut iter = self.entries.iter();
        let Some(first) = iter.next() else {
            return;
        };
        let mut mbr = *first.mbr();
        for entry in iter {
            mbr.expand(entry.mbr());
        }
        self.mbr = mbr;
    }

    /// 把整个子树中的数据条目展平到 `out` 中
    pub fn flatten_into(self, out: &mut Vec<(Rectangle, T)>) {
        for entry in self.entries {
            match entry {
                Entry::Data { mbr, data } => out.push((mbr, data)),
                Entry::Node { node } => node.flatten_into(out),
            }
        }
    }
}

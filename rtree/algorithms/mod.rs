// R-tree算法模块
//
// 按功能分解为不同的子模块：
// - search: 范围搜索与全量遍历
// - insert: 插入与子树选择
// - split: 节点分裂
// - delete: 删除、下溢重插与根节点收缩

pub mod delete;
pub mod insert;
pub mod search;
pub mod split;

// ==========================================
// 电商后台发货核心 - 发货商品选择模型
// ==========================================
// 职责: 维护本次发货包含的订单行，并推算建议重量
// 规则: 建议重量 = Σ quantity × 单件重量（默认 0.5kg），保留两位小数
// 说明: 建议值仅作为起点，用户可随时改写
// ==========================================

use std::collections::BTreeSet;

use crate::domain::OrderItem;
use crate::engine::selection::SelectionError;

/// 默认单件重量（kg）
pub const DEFAULT_PER_ITEM_WEIGHT_KG: f64 = 0.5;

// ==========================================
// ItemSelection - 商品勾选状态
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct ItemSelection {
    quantities: Vec<u32>,
    selected: BTreeSet<usize>,
    per_item_weight_kg: f64,
}

impl ItemSelection {
    /// 初始状态: 全部勾选
    pub fn all_selected(items: &[OrderItem], per_item_weight_kg: f64) -> Self {
        Self {
            quantities: items.iter().map(|i| i.quantity).collect(),
            selected: (0..items.len()).collect(),
            per_item_weight_kg,
        }
    }

    /// 切换某一行的勾选状态
    ///
    /// # 返回
    /// - Ok(&BTreeSet): 切换后的勾选集合
    /// - Err(SelectionError::ItemIndexOutOfRange): 下标越界（状态不变）
    pub fn toggle(&mut self, index: usize) -> Result<&BTreeSet<usize>, SelectionError> {
        if index >= self.quantities.len() {
            return Err(SelectionError::ItemIndexOutOfRange {
                index,
                len: self.quantities.len(),
            });
        }

        if !self.selected.remove(&index) {
            self.selected.insert(index);
        }
        Ok(&self.selected)
    }

    /// 勾选的下标（升序）
    pub fn indices(&self) -> Vec<usize> {
        self.selected.iter().copied().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// 建议重量（kg），勾选为空时返回 None
    pub fn suggested_weight(&self) -> Option<f64> {
        if self.selected.is_empty() {
            return None;
        }
        let total_qty: u64 = self
            .selected
            .iter()
            .map(|&i| u64::from(self.quantities[i]))
            .sum();
        let weight = total_qty as f64 * self.per_item_weight_kg;
        Some((weight * 100.0).round() / 100.0)
    }

    /// 建议重量文本: 两位小数；勾选为空时为空串（强制用户重新填写）
    pub fn suggested_weight_text(&self) -> String {
        self.suggested_weight()
            .map(|w| format!("{:.2}", w))
            .unwrap_or_default()
    }
}

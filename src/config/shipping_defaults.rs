use serde::{Deserialize, Serialize};

use crate::domain::package::{
    PackageForm, DEFAULT_BREADTH_CM, DEFAULT_HEIGHT_CM, DEFAULT_LENGTH_CM,
};
use crate::engine::item_selection::DEFAULT_PER_ITEM_WEIGHT_KG;

/// 发货弹窗默认值（打开弹窗时读取一次的快照）
///
/// 存储位置：config_kv（scope_id='global'，key='shipping_*'）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShippingDefaults {
    /// 单件估算重量（kg），用于建议重量
    pub per_item_weight_kg: f64,

    /// 默认长（cm）
    pub length_cm: f64,

    /// 默认宽（cm）
    pub breadth_cm: f64,

    /// 默认高（cm）
    pub height_cm: f64,
}

impl Default for ShippingDefaults {
    fn default() -> Self {
        Self {
            per_item_weight_kg: DEFAULT_PER_ITEM_WEIGHT_KG,
            length_cm: DEFAULT_LENGTH_CM,
            breadth_cm: DEFAULT_BREADTH_CM,
            height_cm: DEFAULT_HEIGHT_CM,
        }
    }
}

impl ShippingDefaults {
    /// 生成用于补齐空字段的表单（重量取建议值文本）
    pub fn package_form(&self, weight_text: String) -> PackageForm {
        PackageForm {
            weight: weight_text,
            length: self.length_cm.to_string(),
            breadth: self.breadth_cm.to_string(),
            height: self.height_cm.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_package_form() {
        let form = ShippingDefaults::default().package_form("1.50".to_string());
        assert_eq!(form, PackageForm::new("1.50", "20", "15", "10"));
    }

    #[test]
    fn test_package_form_keeps_large_and_fractional_values() {
        let defaults = ShippingDefaults {
            length_cm: 1e20,
            breadth_cm: 12.5,
            ..ShippingDefaults::default()
        };
        let form = defaults.package_form(String::new());
        assert_eq!(form.length, "100000000000000000000");
        assert_eq!(form.breadth, "12.5");
        assert_eq!(form.height, "10");
    }
}

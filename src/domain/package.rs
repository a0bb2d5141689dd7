// ==========================================
// 电商后台发货核心 - 包裹尺寸模型
// ==========================================
// PackageForm: 用户输入的原始文本（可能为空/非数字）
// PackageDimensions: 校验通过后的数值（均 > 0）
// ==========================================

use crate::domain::types::DimensionField;
use serde::{Deserialize, Serialize};

/// 默认长宽高（cm）
pub const DEFAULT_LENGTH_CM: f64 = 20.0;
pub const DEFAULT_BREADTH_CM: f64 = 15.0;
pub const DEFAULT_HEIGHT_CM: f64 = 10.0;

// ==========================================
// PackageForm - 包裹输入表单
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageForm {
    pub weight: String,  // kg
    pub length: String,  // cm
    pub breadth: String, // cm
    pub height: String,  // cm
}

impl PackageForm {
    pub fn new(weight: &str, length: &str, breadth: &str, height: &str) -> Self {
        Self {
            weight: weight.to_string(),
            length: length.to_string(),
            breadth: breadth.to_string(),
            height: height.to_string(),
        }
    }

    pub fn get(&self, field: DimensionField) -> &str {
        match field {
            DimensionField::Weight => &self.weight,
            DimensionField::Length => &self.length,
            DimensionField::Breadth => &self.breadth,
            DimensionField::Height => &self.height,
        }
    }

    pub fn set(&mut self, field: DimensionField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DimensionField::Weight => self.weight = value,
            DimensionField::Length => self.length = value,
            DimensionField::Breadth => self.breadth = value,
            DimensionField::Height => self.height = value,
        }
    }

    /// 用默认值补齐空字段（已有输入保持不变）
    pub fn fill_blank(&mut self, defaults: &PackageForm) {
        for field in DimensionField::ALL {
            if self.get(field).trim().is_empty() {
                self.set(field, defaults.get(field).to_string());
            }
        }
    }
}

// ==========================================
// PackageDimensions - 校验后的包裹尺寸
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PackageDimensions {
    pub weight: f64,
    pub length: f64,
    pub breadth: f64,
    pub height: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_blank_keeps_existing_values() {
        let mut form = PackageForm::new("3", "", " ", "12");
        form.fill_blank(&PackageForm::new("1.50", "20", "15", "10"));
        assert_eq!(form, PackageForm::new("3", "20", "15", "12"));
    }
}

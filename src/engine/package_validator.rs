// ==========================================
// 电商后台发货核心 - 包裹尺寸校验器
// ==========================================
// 职责: 报价请求前校验 weight/length/breadth/height
// 规则: 必填、必须为数字、必须 > 0
// 红线: 校验失败必须指出第一个出错字段，不允许发起报价请求
// ==========================================

use thiserror::Error;

use crate::domain::{DimensionField, PackageDimensions, PackageForm};

/// 包裹字段校验错误（消息可直接展示给用户）
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageFieldError {
    #[error("Please enter the package {0}")]
    Missing(DimensionField),

    #[error("Package {0} must be a number")]
    NotNumeric(DimensionField),

    #[error("Package {0} must be greater than 0")]
    NotPositive(DimensionField),
}

impl PackageFieldError {
    /// 出错字段
    pub fn field(&self) -> DimensionField {
        match self {
            PackageFieldError::Missing(f)
            | PackageFieldError::NotNumeric(f)
            | PackageFieldError::NotPositive(f) => *f,
        }
    }
}

/// 校验单个字段
pub fn parse_dimension(field: DimensionField, raw: &str) -> Result<f64, PackageFieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(PackageFieldError::Missing(field));
    }

    let value = trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or(PackageFieldError::NotNumeric(field))?;

    if value <= 0.0 {
        return Err(PackageFieldError::NotPositive(field));
    }

    Ok(value)
}

/// 校验包裹表单
///
/// # 返回
/// - Ok(PackageDimensions): 四个字段均有效
/// - Err(PackageFieldError): 第一个无效字段（顺序 weight → length → breadth → height）
pub fn validate_package(form: &PackageForm) -> Result<PackageDimensions, PackageFieldError> {
    Ok(PackageDimensions {
        weight: parse_dimension(DimensionField::Weight, &form.weight)?,
        length: parse_dimension(DimensionField::Length, &form.length)?,
        breadth: parse_dimension(DimensionField::Breadth, &form.breadth)?,
        height: parse_dimension(DimensionField::Height, &form.height)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_package() {
        let dims = validate_package(&PackageForm::new("2.5", "20", "15", "10")).unwrap();
        assert_eq!(dims.weight, 2.5);
        assert_eq!(dims.length, 20.0);
        assert_eq!(dims.breadth, 15.0);
        assert_eq!(dims.height, 10.0);
    }

    #[test]
    fn test_reports_first_invalid_field() {
        // weight 缺失优先于 height 非法
        let err = validate_package(&PackageForm::new("", "20", "15", "-1")).unwrap_err();
        assert_eq!(err, PackageFieldError::Missing(DimensionField::Weight));

        let err = validate_package(&PackageForm::new("1", "20", "abc", "0")).unwrap_err();
        assert_eq!(err, PackageFieldError::NotNumeric(DimensionField::Breadth));

        let err = validate_package(&PackageForm::new("1", "20", "15", "0")).unwrap_err();
        assert_eq!(err, PackageFieldError::NotPositive(DimensionField::Height));
    }

    #[test]
    fn test_rejects_non_finite_and_negative() {
        for raw in ["NaN", "inf", "-inf"] {
            assert_eq!(
                parse_dimension(DimensionField::Length, raw),
                Err(PackageFieldError::NotNumeric(DimensionField::Length)),
                "raw={}",
                raw
            );
        }
        assert_eq!(
            parse_dimension(DimensionField::Weight, "-0.5"),
            Err(PackageFieldError::NotPositive(DimensionField::Weight))
        );
        assert_eq!(parse_dimension(DimensionField::Weight, " 0.25 "), Ok(0.25));
    }

    #[test]
    fn test_message_names_field() {
        let msg = PackageFieldError::NotPositive(DimensionField::Weight).to_string();
        assert_eq!(msg, "Package weight (kg) must be greater than 0");
        let msg = PackageFieldError::Missing(DimensionField::Breadth).to_string();
        assert_eq!(msg, "Please enter the package breadth (cm)");
        assert_eq!(
            PackageFieldError::NotNumeric(DimensionField::Height).field(),
            DimensionField::Height
        );
    }
}

//! Product Models

use rust_decimal::Decimal;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use caja_app::domain::{
    catalog::records::{BrandId, CategoryId},
    products::{
        data::{DEFAULT_MINIMUM_STOCK, ProductData},
        records::Product,
    },
};

use crate::errors::ApiError;

/// `activo` as sent by clients: a boolean or `0`/`1`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub(crate) enum ActiveFlag {
    Flag(bool),
    Number(i64),
    Other(serde_json::Value),
}

impl ActiveFlag {
    fn resolve(flag: Option<Self>) -> Result<bool, ApiError> {
        match flag {
            None => Ok(true),
            Some(Self::Flag(value)) => Ok(value),
            Some(Self::Number(1)) => Ok(true),
            Some(Self::Number(0)) => Ok(false),
            Some(Self::Number(_) | Self::Other(_)) => Err(ApiError::bad_request(
                "Campo activo debe ser booleano, 0 o 1",
            )),
        }
    }
}

/// Product Request
#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct ProductRequest {
    #[serde(default)]
    pub codigo_producto: Option<String>,
    #[serde(default)]
    pub nombre_producto: Option<String>,
    #[serde(default)]
    #[salvo(schema(value_type = Option<f64>))]
    pub precio_venta: Option<Decimal>,
    #[serde(default)]
    #[salvo(schema(value_type = Option<f64>))]
    pub precio_compra: Option<Decimal>,
    #[serde(default)]
    pub id_categoria: Option<i32>,
    #[serde(default)]
    pub id_marca: Option<i32>,
    #[serde(default)]
    pub url_imagen: Option<String>,
    #[serde(default)]
    pub stock_minimo: Option<i32>,
    /// Boolean or `0`/`1`; `null` or absent means active
    #[serde(default)]
    #[salvo(schema(value_type = Option<bool>))]
    pub activo: Option<ActiveFlag>,
}

impl TryFrom<ProductRequest> for ProductData {
    type Error = ApiError;

    fn try_from(request: ProductRequest) -> Result<Self, Self::Error> {
        let present = |value: Option<String>| value.filter(|value| !value.trim().is_empty());

        let (Some(code), Some(name)) = (
            present(request.codigo_producto),
            present(request.nombre_producto),
        ) else {
            return Err(ApiError::bad_request(
                "Faltan campos obligatorios: nombre_producto o codigo_producto",
            ));
        };

        Ok(ProductData {
            code,
            name,
            sale_price: request.precio_venta.unwrap_or_default(),
            purchase_price: request.precio_compra.unwrap_or_default(),
            category_id: request.id_categoria.map(CategoryId::new),
            brand_id: request.id_marca.map(BrandId::new),
            image_url: request.url_imagen,
            minimum_stock: request.stock_minimo.unwrap_or(DEFAULT_MINIMUM_STOCK),
            active: ActiveFlag::resolve(request.activo)?,
        })
    }
}

/// Product Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    pub id_producto: i32,
    pub codigo_producto: String,
    pub nombre_producto: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[salvo(schema(value_type = f64))]
    pub precio_venta: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    #[salvo(schema(value_type = f64))]
    pub precio_compra: Decimal,
    pub id_categoria: Option<i32>,
    pub id_marca: Option<i32>,
    pub url_imagen: Option<String>,
    pub stock_minimo: i32,
    pub activo: bool,
    pub stock: Option<i32>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id_producto: product.id.into_inner(),
            codigo_producto: product.code,
            nombre_producto: product.name,
            precio_venta: product.sale_price,
            precio_compra: product.purchase_price,
            id_categoria: product.category_id.map(CategoryId::into_inner),
            id_marca: product.brand_id.map(BrandId::into_inner),
            url_imagen: product.image_url,
            stock_minimo: product.minimum_stock,
            activo: product.active,
            stock: product.stock,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    fn request(activo: serde_json::Value) -> Result<ProductRequest, serde_json::Error> {
        serde_json::from_value(json!({
            "codigo_producto": "P-1",
            "nombre_producto": "Café",
            "activo": activo
        }))
    }

    #[test]
    fn active_accepts_booleans_and_bits() -> TestResult {
        assert!(!ProductData::try_from(request(json!(false))?)?.active);
        assert!(ProductData::try_from(request(json!(true))?)?.active);
        assert!(!ProductData::try_from(request(json!(0))?)?.active);
        assert!(ProductData::try_from(request(json!(1))?)?.active);

        Ok(())
    }

    #[test]
    fn absent_active_defaults_to_true() -> TestResult {
        let request: ProductRequest = serde_json::from_value(json!({
            "codigo_producto": "P-1",
            "nombre_producto": "Café"
        }))?;

        let data = ProductData::try_from(request)?;

        assert!(data.active, "absent flag should mean active");
        assert_eq!(data.minimum_stock, DEFAULT_MINIMUM_STOCK);
        assert_eq!(data.sale_price, Decimal::ZERO);

        Ok(())
    }

    #[test]
    fn other_active_values_are_rejected() -> TestResult {
        for value in [json!(2), json!("si"), json!([1])] {
            let result = ProductData::try_from(request(value.clone())?);

            assert!(result.is_err(), "{value} should be rejected");
        }

        Ok(())
    }
}

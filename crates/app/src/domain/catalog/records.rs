//! Catalog Records

use crate::ids::TypedId;

/// Category Record
pub struct CategoryRecord;

/// Category Id
pub type CategoryId = TypedId<CategoryRecord>;

/// Brand Record
pub struct BrandRecord;

/// Brand Id
pub type BrandId = TypedId<BrandRecord>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Brand {
    pub id: BrandId,
    pub name: String,
}

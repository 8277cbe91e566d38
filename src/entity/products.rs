use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub stock: i64,
    pub sizes: String,
    pub colors: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::stock_variants::Entity")]
    StockVariants,
}

impl Related<super::stock_variants::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StockVariants.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

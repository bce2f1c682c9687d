use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::address::{Address, AddressFields};
use crate::domain::errors::DomainError;
use crate::domain::ports::AddressRepository;
use crate::schema::addresses;

use super::models::{AddressChangeset, AddressRow, NewAddressRow};

pub struct DieselAddressRepository {
    pool: DbPool,
}

impl DieselAddressRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl AddressRepository for DieselAddressRepository {
    fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Address>, DomainError> {
        let mut conn = self.pool.get()?;
        let rows = addresses::table
            .filter(addresses::user_id.eq(user_id))
            .select(AddressRow::as_select())
            .order(addresses::created_at.asc())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(Address::from).collect())
    }

    fn create(&self, user_id: Uuid, fields: AddressFields) -> Result<Address, DomainError> {
        let mut conn = self.pool.get()?;
        let row = diesel::insert_into(addresses::table)
            .values(&NewAddressRow {
                id: Uuid::new_v4(),
                user_id,
                first_name: fields.first_name,
                last_name: fields.last_name,
                line1: fields.line1,
                line2: fields.line2,
                landmark: fields.landmark,
                zip_code: fields.zip_code,
                state: fields.state,
                country: fields.country,
                mobile: fields.mobile,
            })
            .returning(AddressRow::as_returning())
            .get_result(&mut conn)?;
        Ok(row.into())
    }

    fn find_for_user(&self, user_id: Uuid, id: Uuid) -> Result<Option<Address>, DomainError> {
        let mut conn = self.pool.get()?;
        let row = addresses::table
            .find(id)
            .filter(addresses::user_id.eq(user_id))
            .select(AddressRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(Address::from))
    }

    fn update(&self, id: Uuid, fields: AddressFields) -> Result<Address, DomainError> {
        let mut conn = self.pool.get()?;
        let row = diesel::update(addresses::table.find(id))
            .set(&AddressChangeset::from(fields))
            .returning(AddressRow::as_returning())
            .get_result(&mut conn)?;
        Ok(row.into())
    }

    fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;
        diesel::delete(addresses::table.find(id)).execute(&mut conn)?;
        Ok(())
    }
}

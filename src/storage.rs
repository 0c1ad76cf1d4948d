use sea_orm::sea_query::{ColumnDef, Table};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DatabaseTransaction, DbErr,
    DeriveIden, TransactionTrait,
};

use crate::config::StorageConfig;

/// Shared entry point to the relational store.
///
/// Holds no per-request state; each request calls [`Storage::connect`] to get
/// its own [`StorageHandle`].
#[derive(Clone, Debug)]
pub struct Storage {
    db: DatabaseConnection,
}

impl Storage {
    #[tracing::instrument(skip(config), fields(max_connections = config.max_connections))]
    pub async fn open(config: &StorageConfig) -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new(config.database_url.clone());
        options
            .max_connections(config.max_connections)
            .min_connections(1)
            .sqlx_logging(false);

        let db = Database::connect(options).await?;
        tracing::info!("Storage opened");
        Ok(Self { db })
    }

    /// Creates the `companies` table unless it already exists.
    pub async fn init_schema(&self) -> Result<(), DbErr> {
        let statement = Table::create()
            .table(Companies::Table)
            .if_not_exists()
            .col(
                ColumnDef::new(Companies::Id)
                    .integer()
                    .not_null()
                    .auto_increment()
                    .primary_key(),
            )
            .col(ColumnDef::new(Companies::Name).text().not_null())
            .col(ColumnDef::new(Companies::Industry).text().not_null())
            .col(ColumnDef::new(Companies::Lastinv).text().not_null())
            .to_owned();

        let backend = self.db.get_database_backend();
        self.db.execute(backend.build(&statement)).await?;
        tracing::info!("Schema ready");
        Ok(())
    }

    /// Acquires a handle scoped to one request.
    pub async fn connect(&self) -> Result<StorageHandle, DbErr> {
        let txn = self.db.begin().await?;
        Ok(StorageHandle { txn })
    }
}

/// A store handle valid for the lifetime of one request.
///
/// Mutations become durable only through [`StorageHandle::commit`]. Dropping
/// the handle any other way rolls back and gives the connection back.
pub struct StorageHandle {
    txn: DatabaseTransaction,
}

impl StorageHandle {
    pub fn conn(&self) -> &DatabaseTransaction {
        &self.txn
    }

    pub async fn commit(self) -> Result<(), DbErr> {
        self.txn.commit().await
    }
}

#[derive(DeriveIden)]
enum Companies {
    Table,
    Id,
    Name,
    Industry,
    Lastinv,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{company, Companies as CompanyEntity};
    use sea_orm::{EntityTrait, PaginatorTrait};

    async fn memory_storage() -> Storage {
        let storage = Storage::open(&StorageConfig::in_memory()).await.unwrap();
        storage.init_schema().await.unwrap();
        storage
    }

    fn sample() -> company::ActiveModel {
        company::NewCompany {
            name: "Acme".into(),
            industry: "Tech".into(),
            lastinv: "2024-01-01".into(),
        }
        .into_active_model()
    }

    #[tokio::test]
    async fn init_schema_is_idempotent() {
        let storage = memory_storage().await;
        storage.init_schema().await.unwrap();

        let handle = storage.connect().await.unwrap();
        assert_eq!(CompanyEntity::find().count(handle.conn()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn committed_handle_persists_changes() {
        let storage = memory_storage().await;

        let handle = storage.connect().await.unwrap();
        CompanyEntity::insert(sample()).exec(handle.conn()).await.unwrap();
        handle.commit().await.unwrap();

        let handle = storage.connect().await.unwrap();
        assert_eq!(CompanyEntity::find().count(handle.conn()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn dropped_handle_discards_changes_and_releases() {
        let storage = memory_storage().await;

        {
            let handle = storage.connect().await.unwrap();
            CompanyEntity::insert(sample()).exec(handle.conn()).await.unwrap();
        }

        // A single-connection store would block here if the handle leaked.
        let handle = storage.connect().await.unwrap();
        assert_eq!(CompanyEntity::find().count(handle.conn()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let storage = memory_storage().await;

        let handle = storage.connect().await.unwrap();
        let first = CompanyEntity::insert(sample()).exec(handle.conn()).await.unwrap().last_insert_id;
        CompanyEntity::delete_by_id(first).exec(handle.conn()).await.unwrap();
        let second = CompanyEntity::insert(sample()).exec(handle.conn()).await.unwrap().last_insert_id;
        handle.commit().await.unwrap();

        assert!(second > first);
    }
}

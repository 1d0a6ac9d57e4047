use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument};
use mongodb::{Collection, Database};

use crate::core::Result;
use crate::modules::lancamentos::models::{Lancamento, COLLECTION};

/// Listing order shared by the paginated listing and the PDF report:
/// student name, then due date, then installment number, all ascending.
fn sort_order() -> Document {
    doc! { "nome": 1, "vencimento": 1, "numeroParcela": 1 }
}

/// Repository for installment documents in the `lancamentos` collection
#[derive(Clone)]
pub struct LancamentoRepository {
    collection: Collection<Lancamento>,
}

impl LancamentoRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(COLLECTION),
        }
    }

    /// Insert a generated plan as a single batch.
    ///
    /// Ids are assigned up front so the inserted documents can be returned
    /// without a second round trip. All-or-nothing for this batch only; a
    /// failure here does not touch other students' already-inserted plans.
    pub async fn insert_batch(&self, mut lancamentos: Vec<Lancamento>) -> Result<Vec<Lancamento>> {
        for lancamento in &mut lancamentos {
            lancamento.id = Some(ObjectId::new());
        }
        self.collection.insert_many(&lancamentos, None).await?;
        Ok(lancamentos)
    }

    /// One page of matching documents, in listing order
    pub async fn find_page(
        &self,
        filter: Document,
        skip: u64,
        limit: i64,
    ) -> Result<Vec<Lancamento>> {
        let options = FindOptions::builder()
            .skip(skip)
            .limit(limit)
            .sort(sort_order())
            .build();
        let cursor = self.collection.find(filter, options).await?;
        Ok(cursor.try_collect().await?)
    }

    /// Every matching document, in listing order (used by the PDF report)
    pub async fn find_all(&self, filter: Document) -> Result<Vec<Lancamento>> {
        let options = FindOptions::builder().sort(sort_order()).build();
        let cursor = self.collection.find(filter, options).await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn count(&self, filter: Document) -> Result<u64> {
        Ok(self.collection.count_documents(filter, None).await?)
    }

    pub async fn find_by_id(&self, id: ObjectId) -> Result<Option<Lancamento>> {
        Ok(self.collection.find_one(doc! { "_id": id }, None).await?)
    }

    /// Apply a partial `$set` update and return the updated document
    pub async fn update(&self, id: ObjectId, set: Document) -> Result<Option<Lancamento>> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        Ok(self
            .collection
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": set }, options)
            .await?)
    }

    pub async fn delete(&self, id: ObjectId) -> Result<Option<Lancamento>> {
        Ok(self
            .collection
            .find_one_and_delete(doc! { "_id": id }, None)
            .await?)
    }
}

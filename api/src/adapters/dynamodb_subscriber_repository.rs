use crate::domain::{Subscriber, SubscriberRepository};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use aws_sdk_dynamodb::operation::get_item::builders::GetItemFluentBuilder;
use aws_sdk_dynamodb::operation::scan::builders::ScanFluentBuilder;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;
use std::collections::HashMap;
use uuid::Uuid;

const PARTITION_KEY: &str = "PK";
const TYPE: &str = "Type";
const SUBSCRIBER_TYPE: &str = "Subscriber";
const ID: &str = "id";
const NAME: &str = "name";
const EMAIL: &str = "email";

type Item = HashMap<String, AttributeValue>;

/// Subscribers stored as one DynamoDB item each, partitioned by email.
///
/// Backend failures are logged and then collapsed into the plain return
/// values of [`SubscriberRepository`].
#[derive(Debug, Clone)]
pub struct DynamoDbSubscriberRepository {
    client: Client,
    table_name: String,
}

impl DynamoDbSubscriberRepository {
    pub fn new(client: Client, table_name: String) -> Self {
        Self { client, table_name }
    }

    // The service reads before it writes, so every read has to see the
    // latest committed write.
    fn get_subscriber_item(&self, email: &str) -> GetItemFluentBuilder {
        self.client
            .get_item()
            .table_name(&self.table_name)
            .key(PARTITION_KEY, AttributeValue::S(email.to_string()))
            .consistent_read(true)
    }

    fn scan_subscriber_items(&self) -> ScanFluentBuilder {
        self.client
            .scan()
            .table_name(&self.table_name)
            .filter_expression("#type = :type")
            .expression_attribute_names("#type", TYPE)
            .expression_attribute_values(":type", AttributeValue::S(SUBSCRIBER_TYPE.into()))
            .consistent_read(true)
    }

    async fn scan_subscribers(&self) -> Result<Vec<Subscriber>> {
        let mut subscribers = Vec::new();
        let mut exclusive_start_key = None;

        loop {
            let page = self
                .scan_subscriber_items()
                .set_exclusive_start_key(exclusive_start_key)
                .send()
                .await
                .context(format!(
                    "Failure scanning DynamoDB for subscribers. Using table {}",
                    &self.table_name
                ))?;

            for item in page.items.unwrap_or_default() {
                match subscriber_from_item(&item) {
                    Ok(subscriber) => subscribers.push(subscriber),
                    Err(e) => tracing::warn!(
                        error.cause_chain = ?e,
                        "Skipping a malformed subscriber item"
                    ),
                }
            }

            match page.last_evaluated_key {
                Some(key) if !key.is_empty() => exclusive_start_key = Some(key),
                _ => break,
            }
        }

        Ok(subscribers)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Subscriber>> {
        let output = self
            .get_subscriber_item(email)
            .send()
            .await
            .context(format!(
                "Failure reading subscriber from DynamoDB. Using table {}",
                &self.table_name
            ))?;

        output.item.as_ref().map(subscriber_from_item).transpose()
    }

    /// `Ok(false)` when the conditional put finds the email already stored.
    async fn insert(&self, subscriber: &Subscriber) -> Result<bool> {
        let stored = Subscriber {
            id: Some(Uuid::new_v4().to_string()),
            ..subscriber.clone()
        };

        let result = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item_from_subscriber(&stored)))
            .condition_expression("attribute_not_exists(#pk)")
            .expression_attribute_names("#pk", PARTITION_KEY)
            .send()
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(e)
                if e.as_service_error()
                    .is_some_and(|e| e.is_conditional_check_failed_exception()) =>
            {
                Ok(false)
            }
            Err(e) => Err(e).context(format!(
                "Failure inserting record to DynamoDB. Using table {}",
                &self.table_name
            )),
        }
    }

    /// Upserts by email and reports whether a stored record actually changed.
    async fn replace(&self, subscriber: &Subscriber) -> Result<bool> {
        let id = subscriber
            .id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let output = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(PARTITION_KEY, AttributeValue::S(subscriber.email.clone()))
            .update_expression(
                "SET #type = :type, #name = :name, #email = :email, #id = if_not_exists(#id, :id)",
            )
            .expression_attribute_names("#type", TYPE)
            .expression_attribute_names("#name", NAME)
            .expression_attribute_names("#email", EMAIL)
            .expression_attribute_names("#id", ID)
            .expression_attribute_values(":type", AttributeValue::S(SUBSCRIBER_TYPE.into()))
            .expression_attribute_values(":name", AttributeValue::S(subscriber.name.clone()))
            .expression_attribute_values(":email", AttributeValue::S(subscriber.email.clone()))
            .expression_attribute_values(":id", AttributeValue::S(id))
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .context(format!(
                "Failure updating record in DynamoDB. Using table {}",
                &self.table_name
            ))?;

        let previous = match output.attributes {
            Some(attributes) if !attributes.is_empty() => subscriber_from_item(&attributes)?,
            _ => return Ok(false),
        };

        Ok(!previous.same_details_as(subscriber))
    }

    async fn remove(&self, email: &str) -> Result<bool> {
        let output = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .key(PARTITION_KEY, AttributeValue::S(email.to_string()))
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .context(format!(
                "Failure deleting record from DynamoDB. Using table {}",
                &self.table_name
            ))?;

        Ok(output.attributes.is_some_and(|a| !a.is_empty()))
    }

    async fn contains(&self, email: &str) -> Result<bool> {
        let output = self
            .get_subscriber_item(email)
            .projection_expression("#pk")
            .expression_attribute_names("#pk", PARTITION_KEY)
            .send()
            .await
            .context(format!(
                "Failure reading subscriber from DynamoDB. Using table {}",
                &self.table_name
            ))?;

        Ok(output.item.is_some())
    }
}

#[async_trait]
impl SubscriberRepository for DynamoDbSubscriberRepository {
    #[tracing::instrument(name = "Listing subscribers from DynamoDB", skip(self))]
    async fn get_all(&self) -> Vec<Subscriber> {
        self.scan_subscribers().await.unwrap_or_else(|e| {
            log_failure(&e);
            Vec::new()
        })
    }

    #[tracing::instrument(name = "Finding subscriber in DynamoDB", skip(self))]
    async fn get_by_email(&self, email: &str) -> Option<Subscriber> {
        if email.is_empty() {
            return None;
        }

        self.find_by_email(email).await.unwrap_or_else(|e| {
            log_failure(&e);
            None
        })
    }

    #[tracing::instrument(
        name = "Inserting subscriber into DynamoDB",
        skip(self, subscriber),
        fields(subscriber_email = %subscriber.email)
    )]
    async fn add(&self, subscriber: &Subscriber) -> bool {
        if subscriber.email.is_empty() {
            return false;
        }

        self.insert(subscriber).await.unwrap_or_else(|e| {
            log_failure(&e);
            false
        })
    }

    #[tracing::instrument(
        name = "Replacing subscriber in DynamoDB",
        skip(self, subscriber),
        fields(subscriber_email = %subscriber.email)
    )]
    async fn update(&self, subscriber: &Subscriber) -> bool {
        if subscriber.email.is_empty() {
            return false;
        }

        self.replace(subscriber).await.unwrap_or_else(|e| {
            log_failure(&e);
            false
        })
    }

    #[tracing::instrument(name = "Deleting subscriber from DynamoDB", skip(self))]
    async fn delete(&self, email: &str) -> bool {
        if email.is_empty() {
            return false;
        }

        self.remove(email).await.unwrap_or_else(|e| {
            log_failure(&e);
            false
        })
    }

    #[tracing::instrument(
        name = "Checking subscriber in DynamoDB",
        skip(self, subscriber),
        fields(subscriber_email = %subscriber.email)
    )]
    async fn exists(&self, subscriber: &Subscriber) -> bool {
        if subscriber.email.is_empty() {
            return false;
        }

        self.contains(&subscriber.email).await.unwrap_or_else(|e| {
            log_failure(&e);
            false
        })
    }
}

fn log_failure(e: &anyhow::Error) {
    tracing::error!(
        error.cause_chain = ?e,
        error.message = %e,
        "DynamoDB subscriber operation failed"
    );
}

fn item_from_subscriber(subscriber: &Subscriber) -> Item {
    let mut item = HashMap::from([
        (
            PARTITION_KEY.to_string(),
            AttributeValue::S(subscriber.email.clone()),
        ),
        (TYPE.to_string(), AttributeValue::S(SUBSCRIBER_TYPE.into())),
        (NAME.to_string(), AttributeValue::S(subscriber.name.clone())),
        (EMAIL.to_string(), AttributeValue::S(subscriber.email.clone())),
    ]);

    if let Some(id) = &subscriber.id {
        item.insert(ID.to_string(), AttributeValue::S(id.clone()));
    }

    item
}

fn subscriber_from_item(item: &Item) -> Result<Subscriber> {
    let string_attribute = |key: &str| {
        item.get(key)
            .and_then(|value| value.as_s().ok())
            .cloned()
            .ok_or_else(|| anyhow!("Item is missing the string attribute `{}`", key))
    };

    Ok(Subscriber {
        id: string_attribute(ID).ok(),
        name: string_attribute(NAME)?,
        email: string_attribute(EMAIL)?,
    })
}

use crate::errors::NodeError;
use crate::managers::node::AttioNode;
use crate::managers::transport::{HttpTransport, Transport};
use crate::services::config::NodeConfig;
use crate::services::credentials::{base_headers, AttioCredentials};
use crate::services::logger::Logger;
use crate::services::request_builder::RequestBuilder;
use crate::services::routing_table::RoutingTable;
use crate::services::validation::Validation;
use std::sync::Arc;

pub struct App {
    pub logger: Logger,
    pub config: NodeConfig,
    pub node: AttioNode,
}

impl App {
    pub fn initialize(
        logger: Logger,
        table: RoutingTable,
        config: NodeConfig,
        credentials: Option<AttioCredentials>,
    ) -> Result<Self, NodeError> {
        let transport = Arc::new(HttpTransport::new(logger.clone(), config.timeout_ms)?);
        Self::with_transport(logger, table, config, credentials, transport)
    }

    pub fn with_transport(
        logger: Logger,
        table: RoutingTable,
        config: NodeConfig,
        credentials: Option<AttioCredentials>,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, NodeError> {
        let config = config.validate()?;
        let headers = match &credentials {
            Some(credentials) => credentials.static_headers(),
            None => base_headers(),
        };
        let headers = Validation::new().ensure_headers(&headers)?;
        if table.is_empty() {
            logger.warn("routing table has no entries; every record will fail", None);
        }
        logger.debug(
            "routing table loaded",
            Some(&serde_json::json!({
                "entries": table.len(),
                "base_url": config.base_url,
                "continue_on_fail": config.continue_on_fail,
            })),
        );

        let builder = RequestBuilder::new(logger.clone(), &config.base_url);
        let node = AttioNode::new(
            logger.clone(),
            Arc::new(table),
            builder,
            transport,
            headers,
            config.continue_on_fail,
        );
        Ok(Self {
            logger,
            config,
            node,
        })
    }
}

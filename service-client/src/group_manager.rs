// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use protocol_data::convert::{
    to_chain_node_info, to_group_info, to_wire_chain_node_info,
    to_wire_group_info,
};
use protocol_data::group::{ChainNodeInfo, GroupInfo};
use protocol_data::wire;
use tracing::warn;

use crate::{ClientConfig, Error, ProxyResult, Result, call};

/// Remote surface of the group manager.
#[async_trait]
pub trait GroupManagerServiceProxy: Send + Sync + 'static {
    async fn create_group(&self, group_info: wire::GroupInfo)
    -> ProxyResult<()>;

    async fn expand_group_node(
        &self,
        chain_id: String,
        group_id: String,
        node_info: wire::ChainNodeInfo,
    ) -> ProxyResult<()>;

    async fn remove_group(
        &self,
        chain_id: String,
        group_id: String,
    ) -> ProxyResult<()>;

    async fn remove_group_node(
        &self,
        chain_id: String,
        group_id: String,
        node_name: String,
    ) -> ProxyResult<()>;

    async fn recover_group(
        &self,
        chain_id: String,
        group_id: String,
    ) -> ProxyResult<()>;

    async fn recover_group_node(
        &self,
        chain_id: String,
        group_id: String,
        node_name: String,
    ) -> ProxyResult<()>;

    async fn start_node(
        &self,
        chain_id: String,
        group_id: String,
        node_name: String,
    ) -> ProxyResult<()>;

    async fn stop_node(
        &self,
        chain_id: String,
        group_id: String,
        node_name: String,
    ) -> ProxyResult<()>;

    async fn get_chain_list(&self) -> ProxyResult<Vec<String>>;

    async fn get_group_list(&self, chain_id: String)
    -> ProxyResult<Vec<String>>;

    async fn get_group_info(
        &self,
        chain_id: String,
        group_id: String,
    ) -> ProxyResult<wire::GroupInfo>;

    async fn get_node_info(
        &self,
        chain_id: String,
        group_id: String,
        node_name: String,
    ) -> ProxyResult<wire::ChainNodeInfo>;

    async fn get_group_infos(
        &self,
        chain_id: String,
        group_ids: Vec<String>,
    ) -> ProxyResult<Vec<wire::GroupInfo>>;
}

pub struct GroupManagerServiceClient<P> {
    proxy: Arc<P>,
    timeout: Duration,
}

impl<P: GroupManagerServiceProxy> GroupManagerServiceClient<P> {
    pub fn new(proxy: Arc<P>, config: &ClientConfig) -> Self {
        Self {
            proxy,
            timeout: config.call_timeout,
        }
    }

    pub fn proxy(&self) -> &Arc<P> {
        &self.proxy
    }

    pub async fn create_group(&self, group_info: &GroupInfo) -> Result<()> {
        let request =
            self.proxy.create_group(to_wire_group_info(Some(group_info)));
        call("create_group", self.timeout, request).await
    }

    pub async fn expand_group_node(
        &self,
        chain_id: &str,
        group_id: &str,
        node_info: &ChainNodeInfo,
    ) -> Result<()> {
        let request = self.proxy.expand_group_node(
            chain_id.to_owned(),
            group_id.to_owned(),
            to_wire_chain_node_info(Some(node_info)),
        );
        call("expand_group_node", self.timeout, request).await
    }

    pub async fn remove_group(
        &self,
        chain_id: &str,
        group_id: &str,
    ) -> Result<()> {
        let request = self
            .proxy
            .remove_group(chain_id.to_owned(), group_id.to_owned());
        call("remove_group", self.timeout, request).await
    }

    pub async fn remove_group_node(
        &self,
        chain_id: &str,
        group_id: &str,
        node_name: &str,
    ) -> Result<()> {
        let request = self.proxy.remove_group_node(
            chain_id.to_owned(),
            group_id.to_owned(),
            node_name.to_owned(),
        );
        call("remove_group_node", self.timeout, request).await
    }

    pub async fn recover_group(
        &self,
        chain_id: &str,
        group_id: &str,
    ) -> Result<()> {
        let request = self
            .proxy
            .recover_group(chain_id.to_owned(), group_id.to_owned());
        call("recover_group", self.timeout, request).await
    }

    pub async fn recover_group_node(
        &self,
        chain_id: &str,
        group_id: &str,
        node_name: &str,
    ) -> Result<()> {
        let request = self.proxy.recover_group_node(
            chain_id.to_owned(),
            group_id.to_owned(),
            node_name.to_owned(),
        );
        call("recover_group_node", self.timeout, request).await
    }

    pub async fn start_node(
        &self,
        chain_id: &str,
        group_id: &str,
        node_name: &str,
    ) -> Result<()> {
        let request = self.proxy.start_node(
            chain_id.to_owned(),
            group_id.to_owned(),
            node_name.to_owned(),
        );
        call("start_node", self.timeout, request).await
    }

    pub async fn stop_node(
        &self,
        chain_id: &str,
        group_id: &str,
        node_name: &str,
    ) -> Result<()> {
        let request = self.proxy.stop_node(
            chain_id.to_owned(),
            group_id.to_owned(),
            node_name.to_owned(),
        );
        call("stop_node", self.timeout, request).await
    }

    pub async fn get_chain_list(&self) -> Result<BTreeSet<String>> {
        let chains =
            call("get_chain_list", self.timeout, self.proxy.get_chain_list())
                .await?;
        Ok(chains.into_iter().collect())
    }

    pub async fn get_group_list(
        &self,
        chain_id: &str,
    ) -> Result<BTreeSet<String>> {
        let request = self.proxy.get_group_list(chain_id.to_owned());
        let groups = call("get_group_list", self.timeout, request).await?;
        Ok(groups.into_iter().collect())
    }

    pub async fn get_group_info(
        &self,
        chain_id: &str,
        group_id: &str,
    ) -> Result<GroupInfo> {
        let request = self
            .proxy
            .get_group_info(chain_id.to_owned(), group_id.to_owned());
        let group = call("get_group_info", self.timeout, request).await?;
        Ok(to_group_info(&group))
    }

    pub async fn get_node_info(
        &self,
        chain_id: &str,
        group_id: &str,
        node_name: &str,
    ) -> Result<ChainNodeInfo> {
        let request = self.proxy.get_node_info(
            chain_id.to_owned(),
            group_id.to_owned(),
            node_name.to_owned(),
        );
        let node = call("get_node_info", self.timeout, request).await?;
        Ok(to_chain_node_info(&node))
    }

    /// One group per requested id, in request order. A response that does
    /// not line up with `group_ids` fails with
    /// [`ErrorCode::MalformedResponse`](crate::ErrorCode::MalformedResponse).
    pub async fn get_group_infos(
        &self,
        chain_id: &str,
        group_ids: &[String],
    ) -> Result<Vec<GroupInfo>> {
        const METHOD: &str = "get_group_infos";

        let request = self
            .proxy
            .get_group_infos(chain_id.to_owned(), group_ids.to_vec());
        let groups = call(METHOD, self.timeout, request).await?;

        if groups.len() != group_ids.len() {
            warn!(
                event = "malformed response",
                method = METHOD,
                requested = group_ids.len(),
                returned = groups.len()
            );
            let reason = format!(
                "{} groups for {} ids",
                groups.len(),
                group_ids.len()
            );
            return Err(Error::malformed_response(METHOD, &reason));
        }
        if let Some((group, id)) = groups
            .iter()
            .zip(group_ids)
            .find(|(group, id)| &group.group_id != *id)
        {
            let reason =
                format!("group {} in place of {id}", group.group_id);
            return Err(Error::malformed_response(METHOD, &reason));
        }

        Ok(groups.iter().map(to_group_info).collect())
    }
}

use serde::Serialize;

use crate::xml::XmlElement;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub machine_identifier: String,
    pub host: String,
    pub port: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerIdentity {
    pub machine_identifier: String,
    pub version: String,
}

pub fn decode_server_list(container: &XmlElement) -> Vec<ServerInfo> {
    if container.get_attr("size") == Some("0") {
        return Vec::new();
    }

    container
        .children_named("Server")
        .map(|server| ServerInfo {
            name: server.attr("name"),
            machine_identifier: server.attr("machineIdentifier"),
            host: server.attr("host"),
            port: server.attr("port"),
            version: server.attr("version"),
        })
        .collect()
}

pub fn decode_server_identity(container: &XmlElement) -> ServerIdentity {
    ServerIdentity {
        machine_identifier: container.attr("machineIdentifier"),
        version: container.attr("version"),
    }
}

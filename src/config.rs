pub const BOARD_SIZE: usize = 3;

/// Port the host listens on and the joiner connects to.
pub const DEFAULT_PORT: u16 = 12345;

/// Upper bound on a single read from the peer.
pub const RECV_BUFFER_SIZE: usize = 1024;

/// How long a join attempt waits for the host before giving up.
pub const CONNECT_TIMEOUT_SECS: u64 = 5;

/// The eight winning lines: rows, then columns, then diagonals.
pub const LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

#[cfg(feature = "std")]
mod net {
    use std::net::{IpAddr, Ipv4Addr};
    use std::string::String;
    use std::time::Duration;

    use super::{CONNECT_TIMEOUT_SECS, DEFAULT_PORT};

    /// Address the host binds: every interface.
    pub const DEFAULT_BIND: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

    /// Network settings shared by host and joiner.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct NetConfig {
        pub port: u16,
        pub connect_timeout: Duration,
        /// When set on both peers, names are exchanged after symbol assignment.
        pub player_name: Option<String>,
    }

    impl Default for NetConfig {
        fn default() -> Self {
            Self {
                port: DEFAULT_PORT,
                connect_timeout: Duration::from_secs(CONNECT_TIMEOUT_SECS),
                player_name: None,
            }
        }
    }

    impl NetConfig {
        pub fn with_port(mut self, port: u16) -> Self {
            self.port = port;
            self
        }

        pub fn with_name(mut self, name: Option<String>) -> Self {
            self.player_name = name;
            self
        }
    }
}

#[cfg(feature = "std")]
pub use net::*;

pub mod shared {
    pub mod core {
        pub mod clock;
    }
    pub mod infrastructure {
        pub mod change_stream;
    }
}

pub mod modules {
    pub mod user_summaries {
        pub mod core {
            pub mod summary;
            pub mod transaction;
        }
        pub mod use_cases {
            pub mod aggregate_transactions {
                pub mod decode;
                pub mod handler;
                pub mod outcome;
                pub mod inbound {
                    pub mod http;
                }
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod summary_store;
                #[cfg(feature = "dynamo")]
                pub mod summary_store_dynamo;
                pub mod summary_store_in_memory;
            }
        }
    }
}

pub mod shell;

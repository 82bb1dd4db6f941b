pub mod shared {
    pub mod core {
        pub mod primitives;
    }
    pub mod infrastructure {
        pub mod key_value_store;
        pub mod sessions;
    }
}

pub mod modules {
    pub mod quizzes {
        pub mod core {
            pub mod answers;
            pub mod block;
            pub mod edit;
            pub mod form;
            pub mod preview;
            pub mod quiz;
        }
        pub mod use_cases {
            pub mod edit_quiz {
                pub mod controller;
                pub mod notice;
                pub mod inbound {
                    pub mod http;
                }
            }
            pub mod list_quizzes {
                pub mod view;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
            pub mod render_quiz {
                pub mod renderer;
                pub mod inbound {
                    pub mod http;
                }
            }
        }
        pub mod adapters {
            pub mod outbound {
                pub mod key_value_quiz_repository;
                pub mod quiz_record;
                pub mod quiz_repository;
                pub mod seed;
            }
        }
    }
}

pub mod shell;

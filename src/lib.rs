pub mod error;

pub mod local_elevator {
    pub mod fsm {
        pub mod admission;
        pub mod direction_decider;
        pub mod elevatorfsm;
        pub mod floor_request;
        pub mod watch_list;
    }
}

pub mod elevator_manager {
    pub mod manager;
}

pub mod network {
    pub mod protocol;
    pub mod server;
    pub mod session;
    pub mod sock;
}

pub mod request_file {
    pub mod batch;
    pub mod loader;
}

pub mod timer {
    pub mod tick_timer;
}

pub mod util {
    pub mod config;
    pub mod constants;
}

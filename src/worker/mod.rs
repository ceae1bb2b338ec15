//! Background worker for storage operations.
//!
//! All storage I/O happens on a dedicated thread so sessions never block on the
//! filesystem. Sessions reach the worker through [`StoreRepository`], which
//! implements the domain [`WordRepository`](crate::domain::WordRepository) trait.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Worker implementation and message processing logic
//! - `repository`: Async handle that queues requests and converts responses into outcomes

pub mod handler;
pub mod messages;
pub mod repository;

pub use handler::WordWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerRequest, WorkerResponse};
pub use repository::StoreRepository;

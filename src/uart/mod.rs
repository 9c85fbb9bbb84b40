pub mod isr;
pub mod traits;

pub use isr::{on_uart_interrupt, IsrOutcome};
pub use traits::{InterruptCause, UartPort};

pub mod bindings;
pub mod syscall;

pub type Attr = bindings::perf_event_attr;

#[cfg(test)]
mod test;

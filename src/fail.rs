use crate::error::Error;

#[cold]
#[inline(never)]
pub(crate) fn send_failed(err: &Error) {
    match std::error::Error::source(err) {
        Some(source) => eprintln!("{}: {}, dropping event...", err, source),
        None => eprintln!("{}, dropping event...", err),
    }
}

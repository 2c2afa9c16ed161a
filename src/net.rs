//! Line-oriented TCP command listener.

use std::io::{self, BufRead, BufReader};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};

use log::{debug, info, warn};

use crate::command::parse_token;
use crate::game::Command;

/// Binds `0.0.0.0:port` and forwards parsed commands to `tx` from a
/// background thread. Clients are served one at a time.
pub fn spawn_listener(port: u16, tx: Sender<Command>) -> io::Result<(SocketAddr, JoinHandle<()>)> {
    let listener = TcpListener::bind(("0.0.0.0", port))?;
    let addr = listener.local_addr()?;
    info!("listening for commands on {addr}");

    let handle = thread::Builder::new()
        .name("command-listener".into())
        .spawn(move || accept_loop(listener, tx))?;
    Ok((addr, handle))
}

fn accept_loop(listener: TcpListener, tx: Sender<Command>) {
    for stream in listener.incoming() {
        let stream = match stream {
            Ok(stream) => stream,
            Err(err) => {
                warn!("accept failed: {err}");
                continue;
            }
        };
        if !serve(stream, &tx) {
            debug!("game gone, listener exiting");
            return;
        }
    }
}

/// Reads lines until the client disconnects. Returns `false` once the
/// receiving side has hung up.
fn serve(stream: TcpStream, tx: &Sender<Command>) -> bool {
    let peer = stream
        .peer_addr()
        .map(|addr| addr.to_string())
        .unwrap_or_else(|_| "unknown".into());
    info!("controller connected from {peer}");

    for line in BufReader::new(stream).lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                warn!("read from {peer} failed: {err}");
                break;
            }
        };
        match parse_token(&line) {
            Some(command) => {
                if tx.send(command).is_err() {
                    return false;
                }
            }
            None => debug!("ignored {line:?} from {peer}"),
        }
    }
    info!("controller {peer} disconnected");
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Dir;
    use std::io::Write;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn forwards_direction_lines() {
        let (tx, rx) = mpsc::channel();
        let (addr, _handle) = spawn_listener(0, tx).expect("bind ephemeral port");

        let mut client = TcpStream::connect(("127.0.0.1", addr.port())).expect("connect");
        client
            .write_all(b"Up\nCenter\npitch:3.5\nLeft\n")
            .expect("write");
        drop(client);

        let timeout = Duration::from_secs(5);
        assert_eq!(rx.recv_timeout(timeout), Ok(Command::Move(Dir::Up)));
        assert_eq!(rx.recv_timeout(timeout), Ok(Command::Move(Dir::Left)));
    }
}

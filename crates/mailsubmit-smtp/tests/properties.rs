//! Property tests for message transactions.

#![allow(clippy::unwrap_used)]

use mailsubmit_smtp::{
    Credentials, RecipientKind, Reply, ReplyCode, Result, Session, Transport,
};
use proptest::prelude::*;

/// Transport that accepts everything and records written lines.
#[derive(Debug, Default)]
struct RecordingTransport {
    written: Vec<String>,
}

impl Transport for RecordingTransport {
    async fn connect(&mut self) -> Result<()> {
        Ok(())
    }

    async fn enable_tls(&mut self) -> Result<()> {
        Ok(())
    }

    async fn read(&mut self, expected: ReplyCode) -> Result<Reply> {
        Ok(Reply::new(expected, Vec::new()))
    }

    async fn write_line(&mut self, line: &str) -> Result<()> {
        self.written.push(line.to_string());
        Ok(())
    }

    fn hostname(&self) -> String {
        "192.0.2.1".to_string()
    }

    fn disconnect(&mut self) {}

    fn enable_logging(&mut self) {}
}

fn kind() -> impl Strategy<Value = RecipientKind> {
    prop_oneof![
        Just(RecipientKind::Primary),
        Just(RecipientKind::CarbonCopy),
        Just(RecipientKind::Blind),
    ]
}

fn recipients() -> impl Strategy<Value = Vec<(String, String, RecipientKind)>> {
    prop::collection::vec(("[a-z]{1,8}@example\\.com", "[a-z]{0,6}", kind()), 0..8)
}

proptest! {
    #[test]
    fn send_batch_envelope_follows_insertion_order(
        sender in "[a-z]{0,8}@example\\.com",
        rcpts in recipients(),
        subject in "[A-Za-z0-9 ]{0,20}",
        body in "[A-Za-z0-9 ]{0,40}",
    ) {
        let mut session = Session::new(
            RecordingTransport::default(),
            Credentials::new("user", "pass"),
        );
        let mut email = session.new_email().sender(&sender).subject(&subject).body(&body);
        for (address, name, kind) in &rcpts {
            email = email.recipient(address, name, *kind);
        }
        let data = email.message().to_data();
        tokio_test::block_on(email.send_batch()).unwrap();

        let written = session.into_transport().written;
        let mut expected = vec![format!("MAIL FROM: <{sender}>")];
        expected.extend(rcpts.iter().map(|(address, _, _)| format!("RCPT TO: <{address}>")));
        expected.push("DATA".to_string());
        expected.push(data);
        prop_assert_eq!(written, expected);
    }

    #[test]
    fn data_lists_each_present_role_once(
        rcpts in recipients(),
    ) {
        let mut session = Session::new(
            RecordingTransport::default(),
            Credentials::new("user", "pass"),
        );
        let mut email = session.new_email().sender("from@example.com");
        for (address, name, kind) in &rcpts {
            email = email.recipient(address, name, *kind);
        }
        let data = email.message().to_data();
        let (headers, _) = data.split_once("\r\n\r\n").unwrap();
        let lines: Vec<&str> = headers.split("\r\n").collect();

        let mut positions = Vec::new();
        for kind in [RecipientKind::Primary, RecipientKind::CarbonCopy, RecipientKind::Blind] {
            let prefix = format!("{}: ", kind.header());
            let matching: Vec<usize> = lines
                .iter()
                .enumerate()
                .filter(|(_, line)| line.starts_with(&prefix))
                .map(|(i, _)| i)
                .collect();
            let count = rcpts.iter().filter(|(_, _, k)| *k == kind).count();
            if count == 0 {
                prop_assert!(matching.is_empty());
            } else {
                prop_assert_eq!(matching.len(), 1);
                prop_assert_eq!(lines[matching[0]].matches('@').count(), count);
                positions.push(matching[0]);
            }
        }
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(data.ends_with("\r\n."));
    }
}

// src/test_support.rs
//
// Loopback HTTP fixture server and page builders for pipeline tests.

use std::{
    collections::HashMap,
    io::{BufRead, BufReader, Write},
    net::TcpListener,
    thread,
};

use tracing_subscriber::{EnvFilter, FmtSubscriber};
use url::Url;

pub(crate) const SITE_PATH: &str = "/pls/ps2017nss/";

pub(crate) fn init_test_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,volby_scraper=debug")),
        )
        .with_test_writer()
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Serves canned bodies keyed by request target (`/path?query`).
/// Unknown targets get a 404. Runs until the test process exits.
pub(crate) struct FixtureServer {
    base: Url,
}

impl FixtureServer {
    /// `routes` are `(target relative to SITE_PATH, status, body)`.
    pub(crate) fn start(routes: Vec<(&str, u16, String)>) -> Self {
        let routes: HashMap<String, (u16, String)> = routes
            .into_iter()
            .map(|(target, status, body)| (format!("{}{}", SITE_PATH, target), (status, body)))
            .collect();

        let listener = TcpListener::bind("127.0.0.1:0").expect("bind loopback");
        let addr = listener.local_addr().expect("local addr");

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { continue };
                let Ok(read_half) = stream.try_clone() else { continue };
                let mut reader = BufReader::new(read_half);

                let mut request_line = String::new();
                if reader.read_line(&mut request_line).is_err() {
                    continue;
                }
                loop {
                    let mut line = String::new();
                    match reader.read_line(&mut line) {
                        Ok(0) | Err(_) => break,
                        Ok(_) if line == "\r\n" || line == "\n" => break,
                        Ok(_) => {}
                    }
                }

                let target = request_line.split_whitespace().nth(1).unwrap_or("/");
                let (status, body) = routes
                    .get(target)
                    .cloned()
                    .unwrap_or((404, "not found".to_string()));
                let reason = match status {
                    200 => "OK",
                    404 => "Not Found",
                    _ => "Error",
                };
                let response = format!(
                    "HTTP/1.1 {} {}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    reason,
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes());
                let _ = stream.flush();
            }
        });

        let base = Url::parse(&format!("http://{}{}", addr, SITE_PATH)).expect("fixture base");
        Self { base }
    }

    pub(crate) fn base(&self) -> &Url {
        &self.base
    }

    pub(crate) fn url(&self, target: &str) -> Url {
        self.base.join(target).expect("fixture url")
    }
}

/// District listing: one linked row per `(code, name, href)` plus a subtotal row.
pub(crate) fn listing_page(rows: &[(&str, &str, &str)]) -> String {
    let mut html = String::from(
        "<html><body><table>\
         <tr><th>Obec číslo</th><th>Obec název</th><th>Výběr okrsku</th></tr>",
    );
    for (code, name, href) in rows {
        html.push_str(&format!(
            "<tr><td class=\"cislo\"><a href=\"{href}\">{code}</a></td>\
             <td class=\"overflow_name\">{name}</td>\
             <td class=\"center\"><a href=\"{href}\">X</a></td></tr>"
        ));
    }
    html.push_str("<tr><td>Celkem</td><td>okres</td><td>-</td></tr></table></body></html>");
    html
}

/// Detail page: summary table followed by one party table.
pub(crate) fn detail_page(summary: [&str; 3], parties: &[[&str; 5]]) -> String {
    let [registered, envelopes, valid] = summary;
    let mut html = format!(
        "<html><body><table id=\"ps311_t1\">\
         <tr><th id=\"sa2\">Voliči v seznamu</th><th id=\"sa3\">Vydané obálky</th><th id=\"sa6\">Platné hlasy</th></tr>\
         <tr><td headers=\"sa2\">{registered}</td><td headers=\"sa3\">{envelopes}</td><td headers=\"sa6\">{valid}</td></tr>\
         </table>\
         <table><tr><th colspan=\"2\">Strana</th><th colspan=\"3\">Platné hlasy</th></tr>\
         <tr><th>číslo</th><th>název</th><th>celkem</th><th>v %</th><th>v %</th></tr>"
    );
    for row in parties {
        html.push_str("<tr>");
        for cell in row {
            html.push_str(&format!("<td>{}</td>", cell));
        }
        html.push_str("</tr>");
    }
    html.push_str("</table></body></html>");
    html
}

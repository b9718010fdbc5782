// src/utils.rs
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use std::fmt;
use std::net::IpAddr;

#[derive(Debug)]
pub enum RequestError {
    MissingPeerIP,
    RateLimitExceeded,
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPeerIP => write!(f, "Failed to extract client IP"),
            Self::RateLimitExceeded => write!(f, "Rate limit exceeded"),
        }
    }
}

impl ResponseError for RequestError {
    fn error_response(&self) -> HttpResponse {
        match self {
            Self::RateLimitExceeded => HttpResponse::TooManyRequests().body(self.to_string()),
            _ => HttpResponse::BadRequest().body(self.to_string()),
        }
    }
}

pub fn extract_peer_ip(req: &HttpRequest) -> Result<IpAddr, RequestError> {
    // Honour the first hop of X-Forwarded-For when a reverse proxy sits in
    // front, otherwise fall back to the socket peer address.
    if let Some(forwarded_for) = req.headers().get("X-Forwarded-For") {
        if let Ok(ip_str) = forwarded_for.to_str() {
            if let Some(first_ip) = ip_str.split(',').next() {
                if let Ok(ip) = first_ip.trim().parse::<IpAddr>() {
                    return Ok(ip);
                }
            }
        }
    }

    match req.peer_addr() {
        Some(addr) => Ok(addr.ip()),
        None => Err(RequestError::MissingPeerIP),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn prefers_the_first_forwarded_hop() {
        let req = TestRequest::default()
            .insert_header(("X-Forwarded-For", "203.0.113.9, 10.0.0.1"))
            .peer_addr("192.0.2.1:40000".parse().unwrap())
            .to_http_request();

        assert_eq!(
            extract_peer_ip(&req).unwrap(),
            "203.0.113.9".parse::<IpAddr>().unwrap()
        );
    }

    #[test]
    fn falls_back_to_the_socket_peer() {
        let req = TestRequest::default()
            .peer_addr("192.0.2.1:40000".parse().unwrap())
            .to_http_request();

        assert_eq!(
            extract_peer_ip(&req).unwrap(),
            "192.0.2.1".parse::<IpAddr>().unwrap()
        );
    }

    #[test]
    fn garbage_forwarded_header_falls_back_to_the_socket_peer() {
        let req = TestRequest::default()
            .insert_header(("X-Forwarded-For", "not-an-ip"))
            .peer_addr("192.0.2.1:40000".parse().unwrap())
            .to_http_request();

        assert_eq!(
            extract_peer_ip(&req).unwrap(),
            "192.0.2.1".parse::<IpAddr>().unwrap()
        );
    }
}

//! Named routes of the service.
//!
//! The router registers its handlers on these paths, the documents build
//! their hyperlinks from them, and the URL resolver matches incoming
//! reference URLs against them, so all three always agree.

use axum::http::Method;
use itertools::Itertools;

use crate::model::Id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteName {
    Health,
    Owners,
    OwnerSummary,
    OwnerByNationalId,
    Owner,
    OwnerOwnerships,
    Ownerships,
    Ownership,
    OwnershipParkingAssignments,
    ParkingAssignments,
    ParkingAssignment,
    ParkingSpots,
    ParkingSpot,
    Properties,
    Property,
}

#[derive(Debug)]
pub struct RouteDef {
    pub name: RouteName,
    /// Path in axum syntax; `:name` segments are integer parameters.
    pub path: &'static str,
    pub methods: &'static [Method],
}

pub static ROUTE_TABLE: &[RouteDef] = &[
    RouteDef {
        name: RouteName::Health,
        path: "/health",
        methods: &[Method::GET],
    },
    RouteDef {
        name: RouteName::Owners,
        path: "/owners/",
        methods: &[Method::GET, Method::POST],
    },
    RouteDef {
        name: RouteName::OwnerSummary,
        path: "/owners/summary/",
        methods: &[Method::GET],
    },
    RouteDef {
        name: RouteName::OwnerByNationalId,
        path: "/owners/by-national-id/:nid",
        methods: &[Method::GET],
    },
    RouteDef {
        name: RouteName::Owner,
        path: "/owners/:id",
        methods: &[Method::GET, Method::PUT, Method::DELETE],
    },
    RouteDef {
        name: RouteName::OwnerOwnerships,
        path: "/owners/:id/ownerships/",
        methods: &[Method::GET, Method::POST],
    },
    RouteDef {
        name: RouteName::Ownerships,
        path: "/ownerships/",
        methods: &[Method::GET],
    },
    RouteDef {
        name: RouteName::Ownership,
        path: "/ownerships/:id",
        methods: &[Method::GET, Method::PUT, Method::DELETE],
    },
    RouteDef {
        name: RouteName::OwnershipParkingAssignments,
        path: "/ownerships/:id/parking-assignments/",
        methods: &[Method::GET, Method::POST],
    },
    RouteDef {
        name: RouteName::ParkingAssignments,
        path: "/parking-assignments/",
        methods: &[Method::GET],
    },
    RouteDef {
        name: RouteName::ParkingAssignment,
        path: "/parking-assignments/:id",
        methods: &[Method::GET, Method::PUT, Method::DELETE],
    },
    RouteDef {
        name: RouteName::ParkingSpots,
        path: "/parking-spots/",
        methods: &[Method::GET, Method::POST],
    },
    RouteDef {
        name: RouteName::ParkingSpot,
        path: "/parking-spots/:id",
        methods: &[Method::GET, Method::PUT, Method::DELETE],
    },
    RouteDef {
        name: RouteName::Properties,
        path: "/properties/",
        methods: &[Method::GET, Method::POST],
    },
    RouteDef {
        name: RouteName::Property,
        path: "/properties/:id",
        methods: &[Method::GET, Method::PUT, Method::DELETE],
    },
];

impl RouteName {
    pub fn def(self) -> &'static RouteDef {
        ROUTE_TABLE
            .iter()
            .find(|route| route.name == self)
            .unwrap_or_else(|| unreachable!("route {:?} missing from ROUTE_TABLE", self))
    }

    pub fn path(self) -> &'static str {
        self.def().path
    }
}

impl RouteDef {
    /// Match `path` against this route, returning the parameters in order
    /// of appearance. Parameter segments only match integers.
    pub fn match_path(&self, path: &str) -> Option<Vec<(&'static str, Id)>> {
        let pattern: Vec<&'static str> = self.path.split('/').collect();
        let segments: Vec<&str> = path.split('/').collect();
        if pattern.len() != segments.len() {
            return None;
        }

        let mut params = Vec::new();
        for (expected, actual) in pattern.into_iter().zip(segments) {
            match expected.strip_prefix(':') {
                Some(name) => params.push((name, actual.parse::<Id>().ok()?)),
                None if expected == actual => {}
                None => return None,
            }
        }
        Some(params)
    }

    /// Fill every parameter segment with `id`. All parameterised routes
    /// take exactly one parameter.
    pub fn fill(&self, id: Id) -> String {
        self.path
            .split('/')
            .map(|segment| {
                if segment.starts_with(':') {
                    id.to_string()
                } else {
                    segment.to_string()
                }
            })
            .join("/")
    }
}

/// The views the single page shell knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    SessionList,
    SessionDetail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Redirect(&'static str),
    View(View),
}

/// the result of looking up a path in the route table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Redirect(&'static str),
    SessionList,
    SessionDetail(i64),
}

/// `:id` segments match a session identifier
const ROUTES: [(&str, Target); 3] = [
    ("/", Target::Redirect("/sessions")),
    ("/sessions", Target::View(View::SessionList)),
    ("/sessions/:id", Target::View(View::SessionDetail)),
];

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|segment| !segment.is_empty()).collect()
}

/// Find the route serving `path`, trailing slashes are ignored
pub fn resolve(path: &str) -> Option<Route> {
    let path = segments(path);

    ROUTES.iter().find_map(|(pattern, target)| {
        let pattern = segments(pattern);
        if pattern.len() != path.len() {
            return None;
        }

        let mut id = None;
        for (expected, actual) in pattern.iter().zip(path.iter()) {
            if *expected == ":id" {
                id = Some(actual.parse::<i64>().ok()?);
            } else if expected != actual {
                return None;
            }
        }

        match (*target, id) {
            (Target::Redirect(to), _) => Some(Route::Redirect(to)),
            (Target::View(View::SessionList), _) => Some(Route::SessionList),
            (Target::View(View::SessionDetail), Some(id)) => Some(Route::SessionDetail(id)),
            (Target::View(View::SessionDetail), None) => None,
        }
    })
}

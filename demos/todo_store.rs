//! Demonstration of a store managing complex state: a todo app

use pawl::{bind_action_creator, Store, StoreAction, StoreError};

#[derive(Clone, Debug)]
struct TodoItem {
    id: usize,
    title: String,
    completed: bool,
}

#[derive(Clone, Debug, PartialEq)]
enum TodoFilter {
    All,
    Active,
    Completed,
}

#[derive(Clone, Debug)]
struct AppState {
    todos: Vec<TodoItem>,
    filter: TodoFilter,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            todos: Vec::new(),
            filter: TodoFilter::All,
        }
    }
}

impl AppState {
    fn filtered_todos(&self) -> Vec<&TodoItem> {
        match self.filter {
            TodoFilter::All => self.todos.iter().collect(),
            TodoFilter::Active => self.todos.iter().filter(|t| !t.completed).collect(),
            TodoFilter::Completed => self.todos.iter().filter(|t| t.completed).collect(),
        }
    }

    fn stats(&self) -> (usize, usize, usize) {
        let total = self.todos.len();
        let completed = self.todos.iter().filter(|t| t.completed).count();
        let active = total - completed;
        (total, active, completed)
    }
}

#[derive(Debug, Clone)]
enum TodoAction {
    Add { title: String },
    Toggle { id: usize },
    SetFilter(TodoFilter),
}

fn todo_app(state: Option<AppState>, action: StoreAction<&TodoAction>) -> AppState {
    let mut state = state.unwrap_or_default();
    match action {
        StoreAction::Action(TodoAction::Add { title }) => {
            let id = state.todos.len();
            state.todos.push(TodoItem {
                id,
                title: title.clone(),
                completed: false,
            });
        }
        StoreAction::Action(TodoAction::Toggle { id }) => {
            if let Some(todo) = state.todos.iter_mut().find(|t| t.id == *id) {
                todo.completed = !todo.completed;
            }
        }
        StoreAction::Action(TodoAction::SetFilter(filter)) => {
            state.filter = filter.clone();
        }
        _ => {}
    }
    state
}

fn print_todos(store: &Store<AppState, TodoAction>) -> Result<(), StoreError> {
    store.read(|state| {
        for todo in state.filtered_todos() {
            let status = if todo.completed { "✓" } else { " " };
            println!("   [{}] {}", status, todo.title);
        }
    })
}

fn main() -> Result<(), StoreError> {
    println!("=== Store Example: Todo App ===\n");

    // Create store; the reducer's Init transition supplies the empty state
    println!("1. Creating store");
    let store = Store::new(todo_app);

    // Subscribe to state changes
    println!("\n2. Setting up subscriber");
    let stats_store = store.clone();
    let _subscription = store.subscribe(move || {
        if let Ok((total, active, completed)) = stats_store.read(|state| state.stats()) {
            println!(
                "   [Store Update] Total: {}, Active: {}, Completed: {}",
                total, active, completed
            );
        }
    })?;

    // Bind the add creator so call sites stay small
    let add_todo = bind_action_creator(
        |title: &str| TodoAction::Add {
            title: title.to_string(),
        },
        &store,
    );

    println!("\n3. Adding todos");
    add_todo("Learn Rust")?;
    add_todo("Build a state container")?;
    add_todo("Write documentation")?;

    println!("\n4. Current todos:");
    print_todos(&store)?;

    println!("\n5. Completing first todo");
    store.dispatch(TodoAction::Toggle { id: 0 })?;

    println!("\n6. Completing second todo");
    store.dispatch(TodoAction::Toggle { id: 1 })?;

    println!("\n7. Filtering to show only active todos");
    store.dispatch(TodoAction::SetFilter(TodoFilter::Active))?;

    println!("\n8. Active todos:");
    print_todos(&store)?;

    println!("\n9. Filtering to show completed todos");
    store.dispatch(TodoAction::SetFilter(TodoFilter::Completed))?;

    println!("\n10. Completed todos:");
    print_todos(&store)?;

    println!("\n11. Final statistics:");
    let (total, active, completed) = store.read(|state| state.stats())?;
    println!("   Total: {}", total);
    println!("   Active: {}", active);
    println!("   Completed: {}", completed);

    println!("\n✓ Example complete!");
    Ok(())
}

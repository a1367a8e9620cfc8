//! Lista duplamente encadeada sobre uma arena indexada.
//!
//! Os nós moram em um slice (`&[T]`) e carregam os próprios enlaces
//! (`ListLink`), como numa lista intrusiva. Os enlaces guardam índices, não
//! ponteiros: não há aritmética de offset para recuperar o dono do enlace.
//!
//! Um mesmo tipo pode ter vários campos de enlace. Cada `ListAdapter`
//! escolhe qual campo uma lista usa, então um nó pode estar em várias
//! listas ao mesmo tempo (uma por campo).
//!
//! Custos: append/push/pop/remove O(1); contains/traverse O(n).

use core::marker::PhantomData;

/// Enlace embutido no nó.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListLink {
    prev: Option<usize>,
    next: Option<usize>,
    linked: bool,
}

impl ListLink {
    pub const fn new() -> Self {
        Self {
            prev: None,
            next: None,
            linked: false,
        }
    }

    /// O nó está em alguma lista que usa este campo.
    pub const fn is_linked(&self) -> bool {
        self.linked
    }
}

/// Seleciona o campo de enlace de `T` usado por uma lista.
pub trait ListAdapter<T> {
    fn link(node: &T) -> &ListLink;
    fn link_mut(node: &mut T) -> &mut ListLink;
}

/// Cabeça de lista. Os nós ficam na arena passada a cada operação.
pub struct IndexList<T, A> {
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
    _marker: PhantomData<fn(&T) -> A>,
}

impl<T, A: ListAdapter<T>> IndexList<T, A> {
    pub const fn new() -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
            _marker: PhantomData,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn front(&self) -> Option<usize> {
        self.head
    }

    pub fn back(&self) -> Option<usize> {
        self.tail
    }

    /// Insere no fim.
    ///
    /// # Panics
    ///
    /// Se o nó já estiver encadeado neste campo.
    pub fn append(&mut self, nodes: &mut [T], idx: usize) {
        let old_tail = self.tail;
        let link = A::link_mut(&mut nodes[idx]);
        assert!(!link.linked, "(List) append: nó já está encadeado");
        *link = ListLink {
            prev: old_tail,
            next: None,
            linked: true,
        };

        match old_tail {
            Some(tail) => A::link_mut(&mut nodes[tail]).next = Some(idx),
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
        self.len += 1;
    }

    /// Insere no início.
    ///
    /// # Panics
    ///
    /// Se o nó já estiver encadeado neste campo.
    pub fn push(&mut self, nodes: &mut [T], idx: usize) {
        let old_head = self.head;
        let link = A::link_mut(&mut nodes[idx]);
        assert!(!link.linked, "(List) push: nó já está encadeado");
        *link = ListLink {
            prev: None,
            next: old_head,
            linked: true,
        };

        match old_head {
            Some(head) => A::link_mut(&mut nodes[head]).prev = Some(idx),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
        self.len += 1;
    }

    /// Remove e retorna o primeiro nó.
    pub fn pop(&mut self, nodes: &mut [T]) -> Option<usize> {
        let head = self.head?;
        self.remove(nodes, head);
        Some(head)
    }

    /// Desencadeia um nó desta lista.
    ///
    /// # Panics
    ///
    /// Se o nó não estiver encadeado neste campo.
    pub fn remove(&mut self, nodes: &mut [T], idx: usize) {
        let link = *A::link(&nodes[idx]);
        assert!(link.linked, "(List) remove: nó não está encadeado");

        match link.prev {
            Some(prev) => A::link_mut(&mut nodes[prev]).next = link.next,
            None => self.head = link.next,
        }
        match link.next {
            Some(next) => A::link_mut(&mut nodes[next]).prev = link.prev,
            None => self.tail = link.prev,
        }
        *A::link_mut(&mut nodes[idx]) = ListLink::new();
        self.len -= 1;
    }

    /// Teste de pertinência por varredura.
    pub fn contains(&self, nodes: &[T], idx: usize) -> bool {
        self.iter(nodes).any(|i| i == idx)
    }

    /// Percorre a lista do início ao fim e retorna o primeiro nó para o
    /// qual `pred` devolve `true`.
    pub fn traverse<F>(&self, nodes: &[T], mut pred: F) -> Option<usize>
    where
        F: FnMut(usize, &T) -> bool,
    {
        self.iter(nodes).find(|&i| pred(i, &nodes[i]))
    }

    pub fn iter<'a>(&self, nodes: &'a [T]) -> Iter<'a, T, A> {
        Iter {
            nodes,
            cursor: self.head,
            _marker: PhantomData,
        }
    }
}

impl<T, A: ListAdapter<T>> Default for IndexList<T, A> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterador sobre os índices, na ordem da lista.
pub struct Iter<'a, T, A> {
    nodes: &'a [T],
    cursor: Option<usize>,
    _marker: PhantomData<fn() -> A>,
}

impl<T, A: ListAdapter<T>> Iterator for Iter<'_, T, A> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let cur = self.cursor?;
        self.cursor = A::link(&self.nodes[cur]).next;
        Some(cur)
    }
}
